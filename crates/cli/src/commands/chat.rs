use clap::Args;
use galleria_assistant::{Assistant, ChatClient};
use galleria_core::{ChatProvider, ChatRequest};

use super::{Output, print_json};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    Openai,
    Gemini,
}

impl From<ProviderArg> for ChatProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Self::OpenAi,
            ProviderArg::Gemini => Self::Gemini,
        }
    }
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send.
    pub message: String,
    /// Upstream model provider.
    #[arg(long)]
    pub provider: Option<ProviderArg>,
}

pub async fn send(chat: &ChatClient, args: &ChatArgs, out: &Output) -> anyhow::Result<()> {
    let mut request = ChatRequest::new(&args.message);
    if let Some(provider) = args.provider {
        request = request.with_provider(provider.into());
    }

    let reply = if out.strict {
        chat.try_send_message(&request).await?
    } else {
        chat.send_message(&request).await
    };
    if out.is_json() {
        return print_json(&reply);
    }
    println!("{}", reply.content);
    if reply.is_offline() {
        eprintln!("(assistant offline)");
    }
    Ok(())
}

pub async fn probe(chat: &ChatClient, out: &Output) -> anyhow::Result<()> {
    let online = chat.test_connection().await;
    if out.is_json() {
        return print_json(&serde_json::json!({
            "endpoint": chat.config().endpoint,
            "online": online,
        }));
    }
    if online {
        println!("Chat service at {} is reachable.", chat.config().endpoint);
        return Ok(());
    }
    if out.strict {
        anyhow::bail!("chat service at {} is unreachable", chat.config().endpoint);
    }
    println!("Chat service at {} is unreachable.", chat.config().endpoint);
    Ok(())
}

pub async fn history(chat: &ChatClient, out: &Output) -> anyhow::Result<()> {
    let history = if out.strict {
        chat.try_chat_history().await?
    } else {
        chat.chat_history().await
    };
    if out.is_json() {
        return print_json(&history);
    }
    if history.is_empty() {
        println!("No chat history.");
    }
    for (i, exchange) in history.iter().enumerate() {
        let when = exchange
            .metadata
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("[{}] {when} {}", i + 1, exchange.content);
    }
    Ok(())
}

//! Galleria CLI
//!
//! A command-line interface for browsing, uploading and chatting with the
//! Galleria image service.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use galleria_assistant::ChatClient;
use galleria_client::GalleryClient;
use galleria_core::EnvironmentConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Galleria CLI: talk to the Galleria image service.
#[derive(Parser, Debug)]
#[command(name = "galleria", version, about)]
struct Cli {
    /// TOML file with `apiUrl`, `mcpUrl`, `networkTimeout`, ... keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Image service base URL.
    #[arg(long, env = "GALLERIA_API_URL", global = true)]
    api_url: Option<String>,

    /// Chat service base URL.
    #[arg(long, env = "GALLERIA_MCP_URL", global = true)]
    mcp_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Report failures instead of serving offline data.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check image service health.
    Health,
    /// List images.
    List(commands::images::ListArgs),
    /// Show one image.
    Get(commands::images::IdArgs),
    /// Upload an image file.
    Upload(commands::upload::UploadArgs),
    /// Change an image's title or description.
    Update(commands::images::UpdateArgs),
    /// Delete an image.
    Delete(commands::images::IdArgs),
    /// Resolve an image's download URL.
    Download(commands::images::IdArgs),
    /// Send a message to the gallery assistant.
    Chat(commands::chat::ChatArgs),
    /// Check whether the chat service is reachable.
    Probe,
    /// Show previous chat exchanges.
    History,
}

fn load_config(cli: &Cli) -> anyhow::Result<EnvironmentConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            EnvironmentConfig::load(path)?
        }
        None => EnvironmentConfig::from_env(),
    };
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(url) = &cli.mcp_url {
        config = config.with_mcp_url(url);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let gallery = GalleryClient::from_config(&config)?;
    let out = commands::Output {
        format: cli.format.clone(),
        strict: cli.strict,
    };

    match cli.command {
        Command::Health => commands::health::run(&gallery, &out).await,
        Command::List(args) => commands::images::list(&gallery, &args, &out).await,
        Command::Get(args) => commands::images::get(&gallery, &args, &out).await,
        Command::Upload(args) => commands::upload::run(&gallery, &args, &out).await,
        Command::Update(args) => commands::images::update(&gallery, &args, &out).await,
        Command::Delete(args) => commands::images::delete(&gallery, &args, &out).await,
        Command::Download(args) => commands::images::download(&gallery, &args, &out).await,
        Command::Chat(args) => {
            let chat = ChatClient::from_config(&config)?;
            commands::chat::send(&chat, &args, &out).await
        }
        Command::Probe => commands::chat::probe(&ChatClient::from_config(&config)?, &out).await,
        Command::History => commands::chat::history(&ChatClient::from_config(&config)?, &out).await,
    }
}

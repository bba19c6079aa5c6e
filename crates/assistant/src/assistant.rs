use async_trait::async_trait;
use galleria_core::{ChatExchange, ChatRequest};

/// A gallery chat assistant.
///
/// None of these methods fail: implementations answer with an offline reply
/// when the backing service is unreachable.
#[async_trait]
pub trait Assistant: Send + Sync + std::fmt::Debug {
    /// Send a user message and return the reply.
    async fn send_message(&self, request: &ChatRequest) -> ChatExchange;

    /// Probe the chat service. Returns whether it answered with a 2xx.
    async fn test_connection(&self) -> bool;

    /// Previous exchanges, or an empty list when unavailable.
    async fn chat_history(&self) -> Vec<ChatExchange>;

    /// Last observed reachability. Makes no network call.
    fn connection_status(&self) -> bool;
}

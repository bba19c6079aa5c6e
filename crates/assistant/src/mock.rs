use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use galleria_core::{ChatExchange, ChatMetadata, ChatRequest, Connectivity};

use crate::assistant::Assistant;
use crate::reply::offline_reply;

/// In-memory assistant with scripted replies.
///
/// While online it pops scripted replies in order; once the script runs out,
/// or while marked offline, it serves the same offline replies as
/// [`ChatClient`](crate::ChatClient). Every exchange is appended to the
/// history it returns.
#[derive(Debug, Default)]
pub struct MockAssistant {
    script: Mutex<VecDeque<String>>,
    history: Mutex<Vec<ChatExchange>>,
    connectivity: Connectivity,
}

impl MockAssistant {
    /// Create an online assistant with no scripted replies.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.connectivity.mark_online();
        mock
    }

    /// Create an assistant that is unreachable.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Queue a reply for the next message.
    #[must_use]
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.push_reply(content);
        self
    }

    /// Queue a reply for the next message.
    pub fn push_reply(&self, content: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(content.into());
        }
    }

    /// Flip the simulated reachability.
    pub fn set_online(&self, online: bool) {
        self.connectivity.record(online);
    }
}

#[async_trait]
impl Assistant for MockAssistant {
    async fn send_message(&self, request: &ChatRequest) -> ChatExchange {
        let scripted = if self.connectivity.is_online() {
            self.script.lock().ok().and_then(|mut s| s.pop_front())
        } else {
            None
        };
        let reply = match scripted {
            Some(content) => ChatExchange {
                content,
                metadata: ChatMetadata {
                    offline: false,
                    timestamp: Some(Utc::now()),
                },
            },
            None => offline_reply(&request.message),
        };
        if let Ok(mut history) = self.history.lock() {
            history.push(reply.clone());
        }
        reply
    }

    async fn test_connection(&self) -> bool {
        self.connectivity.is_online()
    }

    async fn chat_history(&self) -> Vec<ChatExchange> {
        if !self.connectivity.is_online() {
            return Vec::new();
        }
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn connection_status(&self) -> bool {
        self.connectivity.is_online()
    }
}

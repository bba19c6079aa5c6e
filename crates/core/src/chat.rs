use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream model family the chat service should route a message to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Free-form context forwarded to the chat service. Sent as `{}` when empty.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    /// Preferred upstream provider; the server picks when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ChatProvider>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: serde_json::Map::new(),
            provider: None,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: ChatProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }
}

/// Metadata attached to a chat reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMetadata {
    /// Whether the reply was synthesized locally because the service was unreachable.
    #[serde(default)]
    pub offline: bool,
    /// When the reply was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A single assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub content: String,
    #[serde(default)]
    pub metadata: ChatMetadata,
}

impl ChatExchange {
    /// A reply produced locally while the chat service is unreachable.
    pub fn offline(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            metadata: ChatMetadata {
                offline: true,
                timestamp: Some(timestamp),
            },
        }
    }

    pub fn is_offline(&self) -> bool {
        self.metadata.offline
    }
}

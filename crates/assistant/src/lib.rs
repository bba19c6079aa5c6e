//! Chat client for the Galleria assistant service.
//!
//! [`ChatClient`] posts user messages to the chat endpoint and never fails
//! outright: when the service cannot be reached it answers with a canned
//! reply picked from the message's keywords (see [`reply`]) and records that
//! the service is offline.

pub mod assistant;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod reply;

pub use assistant::Assistant;
pub use config::AssistantConfig;
pub use error::AssistantError;
pub use http::ChatClient;
pub use mock::MockAssistant;
pub use reply::{ReplyTopic, offline_reply};

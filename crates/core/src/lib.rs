pub mod asset;
pub mod chat;
pub mod config;
pub mod connectivity;
pub mod page;

pub use asset::{AssetPatch, DownloadLink, FALLBACK_ID_PREFIX, HealthStatus, MediaAsset, NewAsset};
pub use chat::{ChatExchange, ChatMetadata, ChatProvider, ChatRequest};
pub use config::{ConfigError, EnvironmentConfig, TUNNEL_BYPASS_HEADER};
pub use connectivity::Connectivity;
pub use page::{ListQuery, Page};

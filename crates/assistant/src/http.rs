use async_trait::async_trait;
use galleria_core::{ChatExchange, ChatRequest, Connectivity, EnvironmentConfig, TUNNEL_BYPASS_HEADER};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::assistant::Assistant;
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::reply::offline_reply;

/// HTTP chat client for the assistant service.
///
/// Clones share the connection pool and the connectivity flag.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    config: AssistantConfig,
    connectivity: Connectivity,
}

impl ChatClient {
    /// Create a new chat client with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a chat client from the shared environment configuration.
    pub fn from_config(env: &EnvironmentConfig) -> Result<Self, AssistantError> {
        Self::new(AssistantConfig::from_environment(env))
    }

    /// Use an existing reqwest client. The configured timeout is still
    /// applied per request.
    pub fn with_client(client: Client, config: AssistantConfig) -> Self {
        Self {
            client,
            config,
            connectivity: Connectivity::new(),
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// POST a JSON body and record reachability from the outcome.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, AssistantError> {
        let url = format!("{}{path}", self.config.endpoint);
        debug!(url = %url, "sending chat request");

        let mut builder = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(body);
        if self.config.tunnel_header {
            builder = builder.header(TUNNEL_BYPASS_HEADER, "true");
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                self.connectivity.mark_offline();
                return Err(AssistantError::from_transport(&e, self.config.timeout));
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.connectivity.mark_offline();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "chat service returned error status");
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        self.connectivity.mark_online();
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, AssistantError> {
        response
            .json::<T>()
            .await
            .map_err(|e| AssistantError::from_transport(&e, self.config.timeout))
    }

    /// Send a message, propagating any failure.
    ///
    /// A reply with blank content counts as a parse failure.
    #[instrument(skip(self, request), fields(provider = ?request.provider))]
    pub async fn try_send_message(&self, request: &ChatRequest) -> Result<ChatExchange, AssistantError> {
        let response = self.post("/chat", request).await?;
        let reply: ChatExchange = self.read_json(response).await?;
        if reply.content.trim().is_empty() {
            return Err(AssistantError::Parse("reply has no content".into()));
        }
        Ok(reply)
    }

    /// Fetch previous exchanges, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_chat_history(&self) -> Result<Vec<ChatExchange>, AssistantError> {
        let response = self.post("/history", &serde_json::json!({})).await?;
        self.read_json(response).await
    }
}

#[async_trait]
impl Assistant for ChatClient {
    async fn send_message(&self, request: &ChatRequest) -> ChatExchange {
        match self.try_send_message(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat unavailable, serving offline reply");
                offline_reply(&request.message)
            }
        }
    }

    async fn test_connection(&self) -> bool {
        match self.post("/chat", &ChatRequest::new("test")).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "chat connection test failed");
                false
            }
        }
    }

    async fn chat_history(&self) -> Vec<ChatExchange> {
        match self.try_chat_history().await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "chat history unavailable");
                Vec::new()
            }
        }
    }

    fn connection_status(&self) -> bool {
        self.connectivity.is_online()
    }
}

//! Galleria HTTP Client
//!
//! A resilient Rust client for the Galleria image service REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use galleria_client::GalleryClient;
//! use galleria_core::ListQuery;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = GalleryClient::new("http://localhost:3000/api/v1");
//!
//!     // Never fails: an unreachable server yields the offline catalog.
//!     let page = client.list_assets(&ListQuery::new().limit(10)).await;
//!     for asset in &page.items {
//!         println!("{} {:?}", asset.id, asset.title);
//!     }
//!
//!     // The `try_` variants surface the error instead.
//!     match client.try_get_asset("img-1").await {
//!         Ok(asset) => println!("{asset:?}"),
//!         Err(e) => eprintln!("image service unavailable: {e}"),
//!     }
//! }
//! ```
//!
//! # Failure handling
//!
//! Every request is bounded by a deadline (15 seconds unless configured) and
//! any non-2xx status counts as a failure. Each operation comes in two forms:
//!
//! - `try_*` returns `Result<_, Error>` and propagates every failure.
//! - the plain method logs the failure and returns deterministic stand-in
//!   data from [`fallback`]. Reads return mock records, uploads return a
//!   record whose id starts with `fallback-`, deletes become no-ops.
//!
//! Nothing is retried.
//!
//! # Configuration
//!
//! ```no_run
//! use galleria_client::GalleryClientBuilder;
//! use std::time::Duration;
//!
//! let client = GalleryClientBuilder::new("https://gallery.example.com/api/v1")
//!     .timeout(Duration::from_secs(5))
//!     .tunnel_header(false)
//!     .build()
//!     .unwrap();
//! ```

mod error;
pub mod fallback;
mod images;
pub mod media_url;

pub use error::Error;

use std::time::Duration;

use galleria_core::{Connectivity, EnvironmentConfig, TUNNEL_BYPASS_HEADER};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters escaped when an id is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP client for the Galleria image service.
///
/// Cloning is cheap; clones share the connection pool and the connectivity
/// flag.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    tunnel_header: bool,
    connectivity: Connectivity,
}

/// Builder for configuring a [`GalleryClient`].
#[derive(Debug)]
pub struct GalleryClientBuilder {
    base_url: String,
    timeout: Duration,
    tunnel_header: bool,
    client: Option<Client>,
}

impl GalleryClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            tunnel_header: true,
            client: None,
        }
    }

    /// Set the request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the tunnel interstitial bypass header (on by default).
    #[must_use]
    pub fn tunnel_header(mut self, enabled: bool) -> Self {
        self.tunnel_header = enabled;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// The configured deadline is still applied to every request.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GalleryClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(GalleryClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
            tunnel_header: self.tunnel_header,
            connectivity: Connectivity::new(),
        })
    }
}

impl GalleryClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galleria_client::GalleryClient;
    ///
    /// let client = GalleryClient::new("http://localhost:3000/api/v1");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        GalleryClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> GalleryClientBuilder {
        GalleryClientBuilder::new(base_url)
    }

    /// Create a client from the shared environment configuration.
    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, Error> {
        GalleryClientBuilder::new(&config.api_url)
            .timeout(config.network_timeout().unwrap_or(DEFAULT_TIMEOUT))
            .tunnel_header(config.bypass_tunnel_warning)
            .build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the most recent request reached the server with a 2xx answer.
    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// URL of the media proxy route for an image.
    ///
    /// The server streams the image bytes from here, which lets devices on
    /// another network display images stored at server-local URLs.
    pub fn proxy_url(&self, id: &str) -> String {
        format!("{}/images/{}/proxy", self.base_url, encode_segment(id))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{endpoint}", self.base_url);
        let req = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json");
        if self.tunnel_header {
            req.header(TUNNEL_BYPASS_HEADER, "true")
        } else {
            req
        }
    }

    /// Send a request and record the outcome. Non-2xx statuses are errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let request = match builder.build() {
            Ok(r) => r,
            Err(e) => {
                self.connectivity.mark_offline();
                return Err(Error::Configuration(e.to_string()));
            }
        };
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = match self.client.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                self.connectivity.mark_offline();
                return Err(Error::from_transport(&e, self.timeout));
            }
        };

        let status = response.status();
        if status.is_success() {
            self.connectivity.mark_online();
            return Ok(response);
        }

        self.connectivity.mark_offline();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), url = %url, body = %body, "image service returned error status");
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_owned()
        } else {
            body
        };
        Err(Error::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, Error> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::from_transport(&e, self.timeout))
    }
}

fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Encode an id for use as a request path segment.
///
/// URL parsing collapses `.` and `..` segments (encoded or not), which would
/// send the request to a different route, so those ids and the empty id are
/// rejected before anything is sent.
fn id_segment(id: &str) -> Result<String, Error> {
    if matches!(id, "" | "." | "..") {
        return Err(Error::Configuration(format!(
            "image id {id:?} cannot be used as a path segment"
        )));
    }
    Ok(encode_segment(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = GalleryClient::new("http://localhost:3000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = GalleryClient::new("http://localhost:3000/api/v1");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn builder_defaults() {
        let client = GalleryClientBuilder::new("http://localhost:3000").build().unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        assert!(client.tunnel_header);
        assert!(!client.is_online());
    }

    #[test]
    fn builder_overrides() {
        let client = GalleryClientBuilder::new("http://localhost:3000")
            .timeout(Duration::from_millis(250))
            .tunnel_header(false)
            .client(Client::new())
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(250));
        assert!(!client.tunnel_header);
    }

    #[test]
    fn from_config_uses_api_url_and_timeout() {
        let config = EnvironmentConfig::default()
            .with_api_url("https://gallery.example.com/api/v1/")
            .with_network_timeout(Duration::from_secs(3))
            .with_bypass_tunnel_warning(false);
        let client = GalleryClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://gallery.example.com/api/v1");
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert!(!client.tunnel_header);

        let client = GalleryClient::from_config(&EnvironmentConfig::default()).unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn proxy_url_encodes_id() {
        let client = GalleryClient::new("https://api.example.com/v1");
        assert_eq!(
            client.proxy_url("img-1"),
            "https://api.example.com/v1/images/img-1/proxy"
        );
        assert_eq!(
            client.proxy_url("a/b c"),
            "https://api.example.com/v1/images/a%2Fb%20c/proxy"
        );
    }

    #[test]
    fn dot_segment_ids_are_rejected() {
        for id in ["", ".", ".."] {
            assert!(matches!(id_segment(id), Err(Error::Configuration(_))), "{id:?}");
        }
        assert_eq!(id_segment("...").unwrap(), "...");
        assert_eq!(id_segment("a.jpg").unwrap(), "a.jpg");
        assert_eq!(id_segment("../x").unwrap(), "..%2Fx");
    }

    #[test]
    fn clones_share_connectivity() {
        let client = GalleryClient::new("http://localhost:3000");
        let clone = client.clone();
        client.connectivity.mark_online();
        assert!(clone.is_online());

        let other = GalleryClient::new("http://localhost:3000");
        assert!(!other.is_online());
    }
}

//! routerchat - Thin Async OpenRouter Client
//!
//! A small client library for OpenRouter-style chat completion APIs: builds
//! JSON request bodies, issues HTTP POSTs, and parses both whole responses
//! and server-sent-event streaming responses.
//!
//! ```no_run
//! use routerchat::{Client, ClientConfig, Message, Request};
//!
//! # async fn run() -> routerchat::Result<()> {
//! let config = ClientConfig::new("https://openrouter.ai/api/v1", "sk-key")
//!     .with_site_name("My App");
//! let client = Client::new(config)?;
//!
//! let request = Request::new(vec![Message::text("user", "Tell me a joke")])
//!     .with_model("google/gemini-2.5-flash");
//!
//! let response = client.chat_completion(&request).await?;
//! println!("{}", response.content().unwrap_or_default());
//!
//! client
//!     .chat_completion_streaming(&request, |event| {
//!         if let Some(fragment) = event.delta_content() {
//!             print!("{fragment}");
//!         }
//!         Ok(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::path::Path;
use std::time::Duration;
use tracing::trace;

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::{
    ApiError, Choice, ContentPart, Delta, DeltaAccumulator, FunctionCall, ImageUrl, Message,
    MessageContent, Request, Response, ResponseMessage, Stop, Tool, ToolCall, ToolChoice, Usage,
};
pub use config::{ClientConfig, ConfigLoader};
pub use error::{BoxError, Error, Result};

use api::streaming::{parse_event_line, LineBuffer};
use client::HttpClient;

/// Attribution header carrying the configured site URL
const HEADER_REFERER: HeaderName = HeaderName::from_static("http-referer");

/// Attribution header carrying the configured site name
const HEADER_TITLE: HeaderName = HeaderName::from_static("x-title");

/// Client for one chat completion endpoint.
///
/// Stateless between calls; a single instance can serve concurrent calls,
/// each of which occupies its own task for the full network exchange.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    http_client: HttpClient,
}

impl Client {
    /// Create a client from a configuration.
    ///
    /// Fails when `base_url` is empty; there is no implicit default endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }

        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            config,
        })
    }

    /// Create a client from a JSON config file
    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(ConfigLoader::from_path(path)?.into_config())
    }

    /// Create a client from the first discovered config file
    pub fn discover() -> Result<Self> {
        Self::new(ConfigLoader::discover()?.into_config())
    }

    /// The resolved configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Attribution headers, set only when the configured values are non-empty.
    fn attribution_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(site_url) = self.config.site_url.as_deref().filter(|s| !s.is_empty()) {
            headers.insert(
                HEADER_REFERER,
                HeaderValue::from_str(site_url)
                    .map_err(|e| Error::Config(format!("invalid site_url: {}", e)))?,
            );
        }

        if let Some(site_name) = self.config.site_name.as_deref().filter(|s| !s.is_empty()) {
            headers.insert(
                HEADER_TITLE,
                HeaderValue::from_str(site_name)
                    .map_err(|e| Error::Config(format!("invalid site_name: {}", e)))?,
            );
        }

        Ok(headers)
    }

    /// Execute a non-streaming chat completion.
    ///
    /// A caller-set `stream` flag is passed through untouched; the buffered
    /// decode then fails if the server actually streams.
    pub async fn chat_completion(&self, request: &Request) -> Result<Response> {
        let headers = self.attribution_headers()?;
        self.http_client
            .post_json(
                &self.completions_url(),
                request,
                &self.config.api_key,
                &headers,
            )
            .await
    }

    /// Execute a streaming chat completion, returning the event sequence as
    /// a lazy, single-pass stream.
    ///
    /// `stream` is unconditionally forced on regardless of the caller-supplied
    /// value. The future resolves once the HTTP status line has been checked;
    /// events are decoded as the body arrives, in wire order. The first
    /// transport or decode error ends the stream.
    pub async fn chat_completion_stream(
        &self,
        request: &Request,
    ) -> Result<impl Stream<Item = Result<Response>> + Send> {
        let mut request = request.clone();
        request.stream = Some(true);

        let headers = self.attribution_headers()?;
        let mut byte_stream = self
            .http_client
            .post_stream(
                &self.completions_url(),
                &request,
                &self.config.api_key,
                &headers,
            )
            .await?;

        Ok(async_stream::try_stream! {
            let mut buffer = LineBuffer::new();

            while let Some(chunk) = byte_stream.next().await {
                let chunk = chunk?;
                for line in buffer.push(&chunk) {
                    if let Some(event) = parse_event_line(&line)? {
                        trace!(id = %event.id, "stream event");
                        yield event;
                    }
                }
            }

            // The body may end without a final newline.
            if let Some(line) = buffer.flush() {
                if let Some(event) = parse_event_line(&line)? {
                    trace!(id = %event.id, "stream event");
                    yield event;
                }
            }
        })
    }

    /// Execute a streaming chat completion, invoking `handler` once per
    /// event in arrival order.
    ///
    /// Returns `Ok(())` once the stream is exhausted, even when no events
    /// were delivered. A handler error aborts immediately: no further lines
    /// are read or decoded, and the error is propagated verbatim as
    /// [`Error::Handler`]. Handler invocations already made are not rolled
    /// back.
    pub async fn chat_completion_streaming<F>(
        &self,
        request: &Request,
        mut handler: F,
    ) -> Result<()>
    where
        F: FnMut(&Response) -> std::result::Result<(), BoxError>,
    {
        let stream = self.chat_completion_stream(request).await?;
        futures::pin_mut!(stream);

        while let Some(event) = stream.next().await {
            let event = event?;
            handler(&event).map_err(Error::Handler)?;
        }

        Ok(())
    }
}

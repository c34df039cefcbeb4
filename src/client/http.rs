//! HTTP Client
//!
//! Thin wrapper over reqwest with the two request paths the API needs:
//! a buffered JSON POST and a streaming POST that hands back the raw byte
//! stream once the status line has been checked.

use crate::error::{Error, Result};
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};

/// Byte-chunk stream of a streaming response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<bytes::Bytes>> + Send>>;

/// HTTP client shared by all calls of one [`crate::Client`]
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// When `timeout` is unset the transport is unbounded and a stuck call
    /// runs until the connection dies or the caller drops the future.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(Error::Transport)?;
        Ok(Self { client })
    }

    fn build_headers(api_key: &str, extra_headers: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| Error::Config(format!("invalid API key format: {}", e)))?,
        );

        for (key, value) in extra_headers {
            headers.insert(key.clone(), value.clone());
        }

        Ok(headers)
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<T, R>(
        &self,
        url: &str,
        body: &T,
        api_key: &str,
        extra_headers: &HeaderMap,
    ) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let headers = Self::build_headers(api_key, extra_headers)?;
        let body_json = serde_json::to_string(body).map_err(Error::Serialize)?;

        debug!(url, "sending completion request");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body_json)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "completion request failed");
            return Err(Error::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::deserialize(e, &body))
    }

    /// POST a JSON body and return the response body as a byte stream.
    ///
    /// The status line is checked before the stream is handed back; a non-OK
    /// status consumes the whole body for diagnostics and fails here.
    pub async fn post_stream(
        &self,
        url: &str,
        body: &impl Serialize,
        api_key: &str,
        extra_headers: &HeaderMap,
    ) -> Result<ByteStream> {
        use async_stream::stream;
        use futures::StreamExt;

        let headers = Self::build_headers(api_key, extra_headers)?;
        let body_json = serde_json::to_string(body).map_err(Error::Serialize)?;

        debug!(url, "sending streaming completion request");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body_json)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "streaming completion request failed");
            return Err(Error::Status { status, body });
        }

        let mut byte_stream = response.bytes_stream();
        let s = stream! {
            while let Some(chunk) = byte_stream.next().await {
                yield chunk.map_err(Error::from);
            }
        };

        Ok(Box::pin(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        assert!(HttpClient::new(None).is_ok());
        assert!(HttpClient::new(Some(Duration::from_secs(30))).is_ok());
    }

    #[test]
    fn test_build_headers_rejects_invalid_key() {
        let err = HttpClient::build_headers("bad\nkey", &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_build_headers_includes_extras() {
        let mut extra = HeaderMap::new();
        extra.insert("X-Title", HeaderValue::from_static("Test App"));

        let headers = HttpClient::build_headers("sk-test", &extra).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("X-Title").unwrap(), "Test App");
    }
}

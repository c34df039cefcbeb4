//! Error Types
//!
//! Failure kinds for the chat completion client. Each call either fully
//! succeeds or fails with exactly one of these at the point of first failure.

use reqwest::StatusCode;

/// Boxed error type used to carry caller-supplied handler errors verbatim.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors (missing file, invalid JSON, empty base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Request body could not be encoded as JSON
    #[error("failed to serialize request")]
    Serialize(#[source] serde_json::Error),

    /// Network-level failure (connection, DNS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-OK HTTP status; carries the raw response body for diagnostics
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response or stream event body is not valid JSON for the expected shape
    #[error("failed to deserialize response: {source}. Data: {data}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
        /// Offending payload, truncated for log hygiene.
        data: String,
    },

    /// Caller-supplied stream handler reported failure
    #[error("handler error")]
    Handler(#[source] BoxError),
}

impl Error {
    /// Build a deserialization error, truncating the offending payload.
    pub(crate) fn deserialize(source: serde_json::Error, data: &str) -> Self {
        let data = if data.len() > 500 {
            let mut end = 500;
            while !data.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &data[..end])
        } else {
            data.to_string()
        };
        Error::Deserialize { source, data }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request for quota reasons (HTTP 429, or 403 with
    /// a quota/rate-limit reason). Hard stop — retrying burns quota.
    #[error("YouTube quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other application-level error envelope from the API.
    #[error("YouTube API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

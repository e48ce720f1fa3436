use thiserror::Error;

/// Errors returned by the Google Trends client.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 — the quota window is exhausted. The client never retries
    /// this; the ingestion loop owns the cooldown.
    #[error("rate limited while fetching trends for '{keyword}'")]
    RateLimited { keyword: String },

    /// The explore response did not contain the interest-over-time widget.
    #[error("no TIMESERIES widget in explore response for '{keyword}'")]
    MissingWidget { keyword: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A base or endpoint URL failed to parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

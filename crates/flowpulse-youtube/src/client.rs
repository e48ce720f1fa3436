//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and quota-aware error classification: HTTP 429, and 403 bodies carrying a
//! quota/rate-limit reason, surface as [`YoutubeError::QuotaExceeded`] so
//! callers can stop instead of burning the remaining daily quota.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::YoutubeError;
use crate::retry::retry_with_backoff;
use crate::types::{SearchListResponse, Video, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `YouTube` Data API v3.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
/// Transient errors (timeouts, 5xx) are retried with exponential backoff up
/// to `max_retries` additional attempts; quota errors are never retried.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined endpoint paths extend it rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Searches for videos matching `query` in `region` and returns their ids.
    ///
    /// Calls the `search` endpoint with `type=video`; search entries without
    /// a `videoId` (channels, playlists) are dropped.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] on HTTP 429 or a 403 quota reason.
    /// - [`YoutubeError::ApiError`] on any other API error envelope.
    /// - [`YoutubeError::Http`] on network failure or non-2xx HTTP status,
    ///   after transient-error retries are exhausted.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_video_ids(
        &self,
        query: &str,
        region: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let url = self.build_url(
            "search",
            &[
                ("part", "id"),
                ("type", "video"),
                ("q", query),
                ("regionCode", region),
                ("maxResults", &max_results.to_string()),
            ],
        )?;

        let body = self.request_json_with_retry(&url).await?;
        let envelope: SearchListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={query}, region={region})"),
                source: e,
            })?;

        Ok(envelope
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Fetches statistics and snippets for up to 50 video ids in one call.
    ///
    /// An empty id list short-circuits to an empty result without issuing a
    /// request.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_video_ids`].
    pub async fn fetch_video_stats(&self, video_ids: &[String]) -> Result<Vec<Video>, YoutubeError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet"), ("id", &video_ids.join(","))],
        )?;

        let body = self.request_json_with_retry(&url).await?;
        let envelope: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(id={} ids)", video_ids.len()),
                source: e,
            })?;

        Ok(envelope.items)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, `key` included.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::ApiError(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn request_json_with_retry(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_json(&url).await }
        })
        .await
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// Quota rejections (429, 403 with quota reason) are classified before
    /// the generic status check so they surface as typed quota errors rather
    /// than opaque HTTP failures.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_rejection(status, &body));
        }

        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Maps a 403/429 rejection body onto the error taxonomy.
    ///
    /// The API reports the reason in `error.errors[].reason`; quota-flavored
    /// reasons become [`YoutubeError::QuotaExceeded`], anything else becomes
    /// [`YoutubeError::ApiError`].
    fn classify_rejection(status: StatusCode, body: &str) -> YoutubeError {
        const QUOTA_REASONS: &[&str] =
            &["quotaExceeded", "rateLimitExceeded", "userRateLimitExceeded"];

        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        let reason = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|e| e.get("errors"))
            .and_then(|errors| errors.get(0))
            .and_then(|first| first.get("reason"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        if status == StatusCode::TOO_MANY_REQUESTS || QUOTA_REASONS.contains(&reason.as_str()) {
            YoutubeError::QuotaExceeded(message)
        } else {
            YoutubeError::ApiError(format!("HTTP {status}: {message}"))
        }
    }
}

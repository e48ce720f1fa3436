//! HTTP client for the Google Trends private API.
//!
//! Fetching an interest series takes two requests: `/trends/api/explore`
//! hands out a per-widget token, and `/trends/api/widgetdata/multiline`
//! returns the series for that token. Both bodies carry an XSSI guard
//! prefix (`)]}'`) that must be stripped before parsing.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use crate::error::TrendsError;
use crate::retry::retry_with_backoff;
use crate::types::{ExploreResponse, MultilineResponse};

const DEFAULT_BASE_URL: &str = "https://trends.google.com/";

/// The widget id carrying the interest-over-time series.
const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// Client for the Google Trends interest-over-time endpoints.
///
/// Use [`TrendsClient::new`] for production or
/// [`TrendsClient::with_base_url`] to point at a mock server in tests.
pub struct TrendsClient {
    client: Client,
    base_url: Url,
    hl: String,
    tz: i32,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl TrendsClient {
    /// Creates a new client pointed at the production endpoints, with the
    /// locale settings the original service used (`en-US`, tz offset 360).
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, TrendsError> {
        Self::with_base_url(
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
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TrendsError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, TrendsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| TrendsError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            hl: "en-US".to_owned(),
            tz: 360,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches the interest-over-time series for one keyword.
    ///
    /// Returns one value per sample point. An empty series means the
    /// keyword has no data for the window — a skip signal for the caller,
    /// not an error.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::RateLimited`] on HTTP 429 from either endpoint.
    /// - [`TrendsError::MissingWidget`] if explore returned no usable
    ///   `TIMESERIES` widget.
    /// - [`TrendsError::Http`] on network failure or other non-2xx status,
    ///   after transient-error retries are exhausted.
    /// - [`TrendsError::Deserialize`] if a body does not match the expected
    ///   shape.
    pub async fn fetch_interest_over_time(
        &self,
        keyword: &str,
        geo: &str,
        timeframe: &str,
    ) -> Result<Vec<i64>, TrendsError> {
        let explore_req = json!({
            "comparisonItem": [
                { "keyword": keyword, "geo": geo, "time": timeframe }
            ],
            "category": 0,
            "property": "",
        });

        let explore_url =
            self.build_url("trends/api/explore", &[("req", &explore_req.to_string())])?;
        let body = self.request_text_with_retry(&explore_url, keyword).await?;
        let explore: ExploreResponse = parse_xssi_json(&body, "explore", keyword)?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET && w.token.is_some() && w.request.is_some())
            .ok_or_else(|| TrendsError::MissingWidget {
                keyword: keyword.to_owned(),
            })?;
        let (Some(token), Some(request)) = (widget.token, widget.request) else {
            return Err(TrendsError::MissingWidget {
                keyword: keyword.to_owned(),
            });
        };

        let data_url = self.build_url(
            "trends/api/widgetdata/multiline",
            &[("req", &request.to_string()), ("token", &token)],
        )?;
        let body = self.request_text_with_retry(&data_url, keyword).await?;
        let multiline: MultilineResponse = parse_xssi_json(&body, "widgetdata", keyword)?;

        Ok(multiline
            .default
            .timeline_data
            .iter()
            .filter_map(|point| point.value.first().copied())
            .collect())
    }

    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, TrendsError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| TrendsError::InvalidUrl(format!("'{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("hl", &self.hl);
            pairs.append_pair("tz", &self.tz.to_string());
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn request_text_with_retry(
        &self,
        url: &Url,
        keyword: &str,
    ) -> Result<String, TrendsError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    return Err(TrendsError::RateLimited {
                        keyword: keyword.to_owned(),
                    });
                }
                let response = response.error_for_status()?;
                Ok(response.text().await?)
            }
        })
        .await
    }
}

/// Strips the XSSI guard prefix and parses the remaining JSON document.
///
/// Google prefixes these bodies with `)]}'` (explore) or `)]}'\n` plus a
/// comma (widgetdata); everything before the first `{` is discarded.
fn parse_xssi_json<T: serde::de::DeserializeOwned>(
    body: &str,
    endpoint: &str,
    keyword: &str,
) -> Result<T, TrendsError> {
    let start = body.find('{').unwrap_or(body.len());
    serde_json::from_str(&body[start..]).map_err(|e| TrendsError::Deserialize {
        context: format!("{endpoint}('{keyword}')"),
        source: e,
    })
}

//! Typed subsets of the Google Trends private API payloads.
//!
//! Both endpoints prefix their JSON bodies with an XSSI guard (`)]}'`),
//! which the client strips before deserializing into these shapes.

use serde::Deserialize;

/// Response of `/trends/api/explore`: a list of widgets, each carrying the
/// token and request payload needed to query its data endpoint.
#[derive(Debug, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
pub struct Widget {
    pub id: String,
    pub token: Option<String>,
    pub request: Option<serde_json::Value>,
}

/// Response of `/trends/api/widgetdata/multiline`.
#[derive(Debug, Deserialize)]
pub struct MultilineResponse {
    pub default: Timeline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub timeline_data: Vec<TimelinePoint>,
}

/// One sample of the interest series. `value` holds one entry per compared
/// keyword; this client always compares exactly one.
#[derive(Debug, Deserialize)]
pub struct TimelinePoint {
    #[serde(default)]
    pub value: Vec<i64>,
}

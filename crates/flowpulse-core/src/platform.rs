use serde::{Deserialize, Serialize};

/// Upstream platform a workflow record was ingested from.
///
/// Stored as text in the database via [`Platform::as_str`]. `Discourse`
/// appears in the read path only; no ingestion adapter ships for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    GoogleTrends,
    Discourse,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::GoogleTrends => "google_trends",
            Platform::Discourse => "discourse",
        }
    }

    /// Parse a platform label. Returns `None` for unknown labels — callers
    /// on the query path treat that as an empty result, not an error.
    #[must_use]
    pub fn parse(s: &str) -> Option<Platform> {
        match s {
            "youtube" => Some(Platform::Youtube),
            "google_trends" => Some(Platform::GoogleTrends),
            "discourse" => Some(Platform::Discourse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips_through_parse() {
        for platform in [Platform::Youtube, Platform::GoogleTrends, Platform::Discourse] {
            assert_eq!(Platform::parse(platform.as_str()), Some(platform));
        }
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(Platform::parse("tiktok"), None);
        assert_eq!(Platform::parse(""), None);
        assert_eq!(Platform::parse("YouTube"), None);
    }

    #[test]
    fn serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&Platform::GoogleTrends).expect("serialize");
        assert_eq!(json, "\"google_trends\"");
    }
}

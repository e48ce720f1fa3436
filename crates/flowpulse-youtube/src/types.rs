//! Typed subsets of the `YouTube` Data API v3 response shapes.
//!
//! Only the fields the adapter consumes are modeled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// Response envelope for `search.list`.
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

/// Search results can reference channels or playlists too; only entries
/// carrying a `videoId` are usable.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Response envelope for `videos.list`.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct Snippet {
    pub title: String,
}

/// Counters arrive as decimal strings; `likeCount`/`commentCount` are absent
/// when the uploader has hidden them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

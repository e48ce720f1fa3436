//! Mapping from the API's video shape to the adapter output contract.

use flowpulse_core::{AdapterItem, RawMetrics};

use crate::types::Video;

/// Normalize one video into an adapter item.
///
/// Mapping: `viewCount → views`, `likeCount → likes`,
/// `commentCount → comments`; the snippet title becomes the workflow name.
/// Counters the uploader has hidden (absent or unparseable) map to 0.
///
/// Returns `None` when the payload carries no statistics object at all —
/// there is nothing to ingest for such a video.
#[must_use]
pub fn video_to_item(video: &Video) -> Option<AdapterItem> {
    let stats = video.statistics.as_ref()?;
    Some(AdapterItem {
        source_id: video.id.clone(),
        name: video.snippet.as_ref().map(|s| s.title.clone()),
        metrics: RawMetrics {
            views: parse_count(stats.view_count.as_deref()),
            likes: parse_count(stats.like_count.as_deref()),
            comments: parse_count(stats.comment_count.as_deref()),
        },
    })
}

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0)
}

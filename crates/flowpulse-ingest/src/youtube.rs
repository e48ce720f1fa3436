//! YouTube ingestion batch: one (query, country) run.

use flowpulse_core::Platform;
use flowpulse_youtube::{video_to_item, YoutubeClient};
use sqlx::PgPool;

use crate::reconcile::{apply_item, RatioPolicy};
use crate::{IngestError, IngestPacing, IngestSummary};

/// Run one YouTube ingestion batch for a country.
///
/// Searches for videos matching `query` in the region, fetches their
/// statistics in one call, then reconciles each video as an independent
/// unit with pacing between units. The batch fetch happens before any unit
/// runs, so a fetch failure — including quota exhaustion — is fatal to this
/// batch and propagates; nothing has been written at that point and the
/// batch is safe to retry wholesale.
///
/// Videos without a statistics payload are skipped and logged, never fatal.
///
/// # Errors
///
/// Returns [`IngestError::Youtube`] if the search or stats fetch fails, or
/// [`IngestError::Db`] on a database failure other than the handled
/// natural-key conflict.
pub async fn run_youtube_ingest(
    pool: &PgPool,
    pacing: &IngestPacing,
    client: &YoutubeClient,
    query: &str,
    country: &str,
    max_results: u32,
) -> Result<IngestSummary, IngestError> {
    tracing::info!(country, query, "starting YouTube ingestion");

    let video_ids = client.search_video_ids(query, country, max_results).await?;
    let videos = client.fetch_video_stats(&video_ids).await?;

    let mut summary = IngestSummary::default();
    let total = videos.len();

    for (index, video) in videos.iter().enumerate() {
        summary.processed = summary.processed.saturating_add(1);

        match video_to_item(video) {
            Some(item) => {
                let applied = apply_item(
                    pool,
                    Platform::Youtube,
                    country,
                    &item,
                    RatioPolicy::CountBased,
                )
                .await?;
                summary.record(applied);
            }
            None => {
                tracing::warn!(
                    source_id = %video.id,
                    country,
                    "skipping video — no statistics payload"
                );
                summary.skip();
            }
        }

        if index + 1 < total {
            pacing.pause_between_units().await;
        }
    }

    tracing::info!(
        country,
        processed = summary.processed,
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        "YouTube ingestion completed"
    );
    Ok(summary)
}

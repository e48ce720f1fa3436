//! Google Trends ingestion batch: one (keyword list, country) run.

use flowpulse_core::{AdapterItem, Platform};
use flowpulse_trends::{series_metrics, TrendsClient, TrendsError};
use sqlx::PgPool;

use crate::reconcile::{apply_item, RatioPolicy};
use crate::{IngestError, IngestPacing, IngestSummary};

/// Run one trends ingestion batch for a country.
///
/// Each keyword is an independent unit: its series is fetched, folded into
/// metrics, and reconciled before the next keyword starts. Unit failures
/// never abort siblings:
///
/// - a throttled fetch (429) skips the keyword after the configured
///   cooldown,
/// - any other fetch failure skips the keyword immediately,
/// - an empty series is "no data for this unit" and skips silently.
///
/// Database failures other than the handled natural-key conflict are the
/// one fatal case — the batch stops and the error propagates.
///
/// # Errors
///
/// Returns [`IngestError::Db`] on such a database failure.
pub async fn run_trends_ingest(
    pool: &PgPool,
    pacing: &IngestPacing,
    client: &TrendsClient,
    keywords: &[String],
    country: &str,
    timeframe: &str,
) -> Result<IngestSummary, IngestError> {
    tracing::info!(
        country,
        keyword_count = keywords.len(),
        "starting Google Trends ingestion"
    );

    // The trends API treats an empty geo as worldwide.
    let geo = if country == "global" { "" } else { country };

    let mut summary = IngestSummary::default();

    for (index, keyword) in keywords.iter().enumerate() {
        summary.processed = summary.processed.saturating_add(1);

        match client.fetch_interest_over_time(keyword, geo, timeframe).await {
            Ok(series) => match series_metrics(&series) {
                Some(metrics) => {
                    let item = AdapterItem {
                        source_id: keyword.clone(),
                        name: Some(keyword.clone()),
                        metrics,
                    };
                    let applied = apply_item(
                        pool,
                        Platform::GoogleTrends,
                        country,
                        &item,
                        RatioPolicy::IndexBased,
                    )
                    .await?;
                    summary.record(applied);
                }
                None => {
                    tracing::info!(keyword = %keyword, country, "no trend data — skipping keyword");
                    summary.skip();
                }
            },
            Err(TrendsError::RateLimited { .. }) => {
                tracing::warn!(
                    keyword = %keyword,
                    country,
                    "trends throttled — skipping keyword after cooldown"
                );
                summary.skip();
                pacing.throttle_cooldown().await;
            }
            Err(e) => {
                tracing::warn!(keyword = %keyword, country, error = %e, "skipping keyword — fetch failed");
                summary.skip();
            }
        }

        if index + 1 < keywords.len() {
            pacing.pause_between_units().await;
        }
    }

    tracing::info!(
        country,
        processed = summary.processed,
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        "Google Trends ingestion completed"
    );
    Ok(summary)
}

//! Upsert application for one adapter item.

use flowpulse_core::{AdapterItem, Platform, RawMetrics};
use flowpulse_db::{
    get_workflow_by_key, insert_workflow, update_workflow_metrics, DbError, InsertOutcome,
    NewWorkflow, WorkflowMetricsUpdate,
};
use sqlx::PgPool;

/// How a platform family's counters relate to engagement ratios.
///
/// | policy       | `like_to_view_ratio`        | `comment_to_view_ratio`        |
/// |--------------|-----------------------------|--------------------------------|
/// | `CountBased` | `likes / views` (0 if `views == 0`) | `comments / views` (0 if `views == 0`) |
/// | `IndexBased` | always 0                    | always 0                       |
///
/// Index-based adapters repurpose `likes`/`comments` as interest statistics,
/// not counts over a `views` denominator, so a ratio would be meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioPolicy {
    CountBased,
    IndexBased,
}

impl RatioPolicy {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratios(self, metrics: &RawMetrics) -> (f64, f64) {
        match self {
            RatioPolicy::CountBased => {
                if metrics.views == 0 {
                    (0.0, 0.0)
                } else {
                    let views = metrics.views as f64;
                    (
                        metrics.likes as f64 / views,
                        metrics.comments as f64 / views,
                    )
                }
            }
            RatioPolicy::IndexBased => (0.0, 0.0),
        }
    }
}

/// Whether the reconcile created a fresh record or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertApplied {
    Inserted,
    Updated,
}

/// Reconcile one adapter item against the store.
///
/// Looks up the natural key, then either overwrites the existing record's
/// mutable fields or inserts a fresh one (write-then-verify). A verified
/// insert conflict means a concurrent writer already owns the key; it is
/// logged and resolved by re-reading and applying the update path — the
/// record ends up carrying this item's values either way.
///
/// # Errors
///
/// Returns [`DbError`] on any database failure other than the handled key
/// conflict. Such failures are fatal to the enclosing batch.
pub async fn apply_item(
    pool: &PgPool,
    platform: Platform,
    country: &str,
    item: &AdapterItem,
    policy: RatioPolicy,
) -> Result<UpsertApplied, DbError> {
    let (like_ratio, comment_ratio) = policy.ratios(&item.metrics);

    if let Some(existing) =
        get_workflow_by_key(pool, platform.as_str(), &item.source_id, country).await?
    {
        overwrite(pool, existing.id, item, like_ratio, comment_ratio).await?;
        tracing::info!(
            source_id = %item.source_id,
            platform = %platform,
            country,
            "updated workflow record"
        );
        return Ok(UpsertApplied::Updated);
    }

    let new = NewWorkflow {
        workflow_name: item.name.as_deref().unwrap_or(&item.source_id),
        platform: platform.as_str(),
        source_id: &item.source_id,
        country,
        views: item.metrics.views,
        likes: item.metrics.likes,
        comments: item.metrics.comments,
        like_to_view_ratio: like_ratio,
        comment_to_view_ratio: comment_ratio,
    };

    match insert_workflow(pool, &new).await? {
        InsertOutcome::Inserted(_) => {
            tracing::info!(
                source_id = %item.source_id,
                platform = %platform,
                country,
                "inserted workflow record"
            );
            Ok(UpsertApplied::Inserted)
        }
        InsertOutcome::Conflict => {
            // Someone else wrote this key between our lookup and the insert.
            // Their row is the canonical one; ours becomes an update to it.
            tracing::warn!(
                source_id = %item.source_id,
                platform = %platform,
                country,
                "natural-key conflict on insert — applying as update"
            );
            let existing = get_workflow_by_key(pool, platform.as_str(), &item.source_id, country)
                .await?
                .ok_or(DbError::NotFound)?;
            overwrite(pool, existing.id, item, like_ratio, comment_ratio).await?;
            Ok(UpsertApplied::Updated)
        }
    }
}

async fn overwrite(
    pool: &PgPool,
    id: i64,
    item: &AdapterItem,
    like_ratio: f64,
    comment_ratio: f64,
) -> Result<(), DbError> {
    update_workflow_metrics(
        pool,
        id,
        &WorkflowMetricsUpdate {
            workflow_name: item.name.as_deref(),
            views: item.metrics.views,
            likes: item.metrics.likes,
            comments: item.metrics.comments,
            like_to_view_ratio: like_ratio,
            comment_to_view_ratio: comment_ratio,
        },
    )
    .await
}

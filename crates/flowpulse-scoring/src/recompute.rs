//! Scoped recompute: read score inputs, normalize per bucket, write back.

use std::collections::BTreeMap;

use flowpulse_db::{list_score_inputs, update_popularity_score, ScoreInputRow};
use sqlx::PgPool;

use crate::normalize::{score_bucket, ScoreInput};
use crate::weights::ScoreWeights;
use crate::ScoringError;

/// The slice of the store one recompute pass covers.
///
/// `None` fields are unconstrained; [`ScoreScope::all`] covers the whole
/// store. Scopes over disjoint (platform, country) pairs touch disjoint
/// records, so they can run concurrently with each other and with
/// ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreScope {
    pub platform: Option<String>,
    pub country: Option<String>,
}

impl ScoreScope {
    /// The whole store.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }
}

/// Recompute `popularity_score` for every record in the scope.
///
/// Records are grouped into (platform, country) buckets, volume is
/// normalized within each bucket, and the composite is written back one
/// record at a time — readers never observe a half-updated composite, and
/// a concurrent recompute of the same scope converges because both write
/// the same deterministic values.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`ScoringError::Db`] on any read or write failure; the caller
/// treats that as fatal to the pass and may simply re-run it.
pub async fn recompute_scores(
    pool: &PgPool,
    scope: &ScoreScope,
    weights: &ScoreWeights,
) -> Result<usize, ScoringError> {
    let rows = list_score_inputs(pool, scope.platform.as_deref(), scope.country.as_deref()).await?;

    tracing::info!(
        records = rows.len(),
        platform = scope.platform.as_deref().unwrap_or("*"),
        country = scope.country.as_deref().unwrap_or("*"),
        "recomputing popularity scores"
    );

    let mut written = 0usize;
    for ((platform, country), bucket) in bucket_rows(rows) {
        let scored = score_bucket(&bucket, weights);
        for (id, score) in scored {
            update_popularity_score(pool, id, score).await?;
            written += 1;
        }
        tracing::debug!(
            platform = %platform,
            country = %country,
            records = bucket.len(),
            "bucket rescored"
        );
    }

    tracing::info!(written, "popularity scores recomputed");
    Ok(written)
}

/// Groups score inputs by (platform, country). `BTreeMap` keeps bucket
/// order deterministic across runs.
fn bucket_rows(rows: Vec<ScoreInputRow>) -> BTreeMap<(String, String), Vec<ScoreInput>> {
    let mut buckets: BTreeMap<(String, String), Vec<ScoreInput>> = BTreeMap::new();
    for row in rows {
        buckets
            .entry((row.platform, row.country))
            .or_default()
            .push(ScoreInput {
                id: row.id,
                views: row.views,
                like_ratio: row.like_to_view_ratio,
                comment_ratio: row.comment_to_view_ratio,
            });
    }
    buckets
}

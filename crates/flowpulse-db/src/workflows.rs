//! Database operations for the `workflows` table.
//!
//! One row per (platform, `source_id`, country); that triple is enforced by a
//! unique index and is the key every ingestion reconciles against.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `workflows` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkflowRow {
    pub id: i64,
    pub public_id: Uuid,
    pub workflow_name: String,
    pub platform: String,
    pub source_id: String,
    pub country: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
    pub popularity_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a new workflow row. `popularity_score` starts at 0
/// and is only ever written by the score recompute pass.
pub struct NewWorkflow<'a> {
    pub workflow_name: &'a str,
    pub platform: &'a str,
    pub source_id: &'a str,
    pub country: &'a str,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
}

/// Metric overwrite for an existing row. `workflow_name` is `None` when the
/// adapter did not supply a fresher name; all counters and ratios are always
/// replaced, never merged.
pub struct WorkflowMetricsUpdate<'a> {
    pub workflow_name: Option<&'a str>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
}

/// Outcome of a write-then-verify insert.
///
/// `Conflict` means the natural key already existed when the insert landed —
/// either a stale read or a concurrent writer. The caller decides whether to
/// re-read and update or to surface the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    Conflict,
}

/// Minimal projection used by the score recompute pass.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreInputRow {
    pub id: i64,
    pub platform: String,
    pub country: String,
    pub views: i64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
}

// ---------------------------------------------------------------------------
// workflows operations
// ---------------------------------------------------------------------------

/// Fetch a workflow row by its natural key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_workflow_by_key(
    pool: &PgPool,
    platform: &str,
    source_id: &str,
    country: &str,
) -> Result<Option<WorkflowRow>, DbError> {
    let row = sqlx::query_as::<_, WorkflowRow>(
        "SELECT id, public_id, workflow_name, platform, source_id, country, \
                views, likes, comments, like_to_view_ratio, comment_to_view_ratio, \
                popularity_score, created_at, updated_at \
         FROM workflows \
         WHERE platform = $1 AND source_id = $2 AND country = $3",
    )
    .bind(platform)
    .bind(source_id)
    .bind(country)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a new workflow row, verifying the natural key was actually free.
///
/// Uses `ON CONFLICT DO NOTHING RETURNING id`: a returned id means the row
/// was inserted; no row means another writer holds the key and the caller
/// gets [`InsertOutcome::Conflict`] instead of a constraint exception.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn insert_workflow(
    pool: &PgPool,
    workflow: &NewWorkflow<'_>,
) -> Result<InsertOutcome, DbError> {
    let public_id = Uuid::new_v4();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO workflows \
             (public_id, workflow_name, platform, source_id, country, \
              views, likes, comments, like_to_view_ratio, comment_to_view_ratio) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (platform, source_id, country) DO NOTHING \
         RETURNING id",
    )
    .bind(public_id)
    .bind(workflow.workflow_name)
    .bind(workflow.platform)
    .bind(workflow.source_id)
    .bind(workflow.country)
    .bind(workflow.views)
    .bind(workflow.likes)
    .bind(workflow.comments)
    .bind(workflow.like_to_view_ratio)
    .bind(workflow.comment_to_view_ratio)
    .fetch_optional(pool)
    .await?;

    Ok(match id {
        Some(id) => InsertOutcome::Inserted(id),
        None => InsertOutcome::Conflict,
    })
}

/// Overwrite the mutable metric fields of an existing row.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given id, or
/// [`DbError::Sqlx`] on query failure.
pub async fn update_workflow_metrics(
    pool: &PgPool,
    id: i64,
    update: &WorkflowMetricsUpdate<'_>,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE workflows SET \
             workflow_name = COALESCE($2, workflow_name), \
             views = $3, \
             likes = $4, \
             comments = $5, \
             like_to_view_ratio = $6, \
             comment_to_view_ratio = $7, \
             updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(update.workflow_name)
    .bind(update.views)
    .bind(update.likes)
    .bind(update.comments)
    .bind(update.like_to_view_ratio)
    .bind(update.comment_to_view_ratio)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Ranked listing for the query surface: rows for one (platform, country),
/// ordered by `popularity_score` descending with a stable `source_id`
/// tie-break.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_top_workflows(
    pool: &PgPool,
    platform: &str,
    country: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<WorkflowRow>, DbError> {
    let rows = sqlx::query_as::<_, WorkflowRow>(
        "SELECT id, public_id, workflow_name, platform, source_id, country, \
                views, likes, comments, like_to_view_ratio, comment_to_view_ratio, \
                popularity_score, created_at, updated_at \
         FROM workflows \
         WHERE platform = $1 AND country = $2 \
         ORDER BY popularity_score DESC, source_id ASC \
         LIMIT $3 OFFSET $4",
    )
    .bind(platform)
    .bind(country)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Score inputs for a recompute scope. `None` filters select the whole
/// store; rows come back grouped by (platform, country) in a deterministic
/// order so callers can bucket in one pass.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_score_inputs(
    pool: &PgPool,
    platform: Option<&str>,
    country: Option<&str>,
) -> Result<Vec<ScoreInputRow>, DbError> {
    let rows = sqlx::query_as::<_, ScoreInputRow>(
        "SELECT id, platform, country, views, like_to_view_ratio, comment_to_view_ratio \
         FROM workflows \
         WHERE ($1::TEXT IS NULL OR platform = $1) \
           AND ($2::TEXT IS NULL OR country = $2) \
         ORDER BY platform, country, id",
    )
    .bind(platform)
    .bind(country)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Write back one recomputed popularity score. Single-row update: readers
/// never observe a half-written composite, and the last writer wins.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given id, or
/// [`DbError::Sqlx`] on query failure.
pub async fn update_popularity_score(pool: &PgPool, id: i64, score: f64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE workflows SET popularity_score = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(score)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

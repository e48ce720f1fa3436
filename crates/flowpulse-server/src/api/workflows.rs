use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use flowpulse_core::Platform;

use super::{map_db_error, normalize_limit, normalize_offset, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TopWorkflowsQuery {
    pub platform: Option<String>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct WorkflowItem {
    workflow: String,
    platform: String,
    country: String,
    popularity_metrics: PopularityMetrics,
}

#[derive(Debug, Serialize)]
pub(super) struct PopularityMetrics {
    views: i64,
    likes: i64,
    comments: i64,
    like_to_view_ratio: f64,
    comment_to_view_ratio: f64,
    popularity_score: f64,
}

/// `GET /workflows/top` — ranked records for one (platform, country).
///
/// Missing or unrecognized filters degrade to an empty list; the query
/// surface never raises domain errors.
pub(super) async fn top_workflows(
    State(state): State<AppState>,
    Query(query): Query<TopWorkflowsQuery>,
) -> Result<Json<Vec<WorkflowItem>>, ApiError> {
    let (Some(platform_raw), Some(country)) = (query.platform.as_deref(), query.country.as_deref())
    else {
        return Ok(Json(Vec::new()));
    };
    let Some(platform) = Platform::parse(platform_raw) else {
        return Ok(Json(Vec::new()));
    };
    if country.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let limit = normalize_limit(query.limit);
    let offset = normalize_offset(query.offset);

    let rows =
        flowpulse_db::list_top_workflows(&state.pool, platform.as_str(), country, limit, offset)
            .await
            .map_err(|e| map_db_error(&e))?;

    let items = rows
        .into_iter()
        .map(|row| WorkflowItem {
            workflow: row.workflow_name,
            platform: row.platform,
            country: row.country,
            popularity_metrics: PopularityMetrics {
                views: row.views,
                likes: row.likes,
                comments: row.comments,
                like_to_view_ratio: row.like_to_view_ratio,
                comment_to_view_ratio: row.comment_to_view_ratio,
                popularity_score: row.popularity_score,
            },
        })
        .collect();

    Ok(Json(items))
}

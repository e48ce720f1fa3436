mod workflows;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Clamp a requested page size into 1..=100, defaulting to 10.
pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(10).clamp(1, 100)
}

/// Negative offsets are treated as 0.
pub(super) fn normalize_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

pub(super) fn map_db_error(error: &flowpulse_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new("internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/workflows/top", get(workflows::top_workflows))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match flowpulse_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "up",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use flowpulse_db::{insert_workflow, update_popularity_score, InsertOutcome, NewWorkflow};
    use tower::ServiceExt;

    #[test]
    fn normalize_limit_applies_defaults_and_bounds() {
        assert_eq!(normalize_limit(None), 10);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(50)), 50);
        assert_eq!(normalize_limit(Some(1000)), 100);
    }

    #[test]
    fn normalize_offset_floors_at_zero() {
        assert_eq!(normalize_offset(None), 0);
        assert_eq!(normalize_offset(Some(-5)), 0);
        assert_eq!(normalize_offset(Some(30)), 30);
    }

    async fn seed_scored(
        pool: &sqlx::PgPool,
        platform: &str,
        source_id: &str,
        country: &str,
        score: f64,
    ) {
        let outcome = insert_workflow(
            pool,
            &NewWorkflow {
                workflow_name: source_id,
                platform,
                source_id,
                country,
                views: 1000,
                likes: 100,
                comments: 10,
                like_to_view_ratio: 0.1,
                comment_to_view_ratio: 0.01,
            },
        )
        .await
        .expect("seed insert");
        let InsertOutcome::Inserted(id) = outcome else {
            panic!("seed hit a conflict for {source_id}");
        };
        update_popularity_score(pool, id, score)
            .await
            .expect("seed score");
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn top_returns_ranked_items_with_metrics(pool: sqlx::PgPool) {
        seed_scored(&pool, "youtube", "v-low", "US", 0.2).await;
        seed_scored(&pool, "youtube", "v-high", "US", 0.9).await;

        let app = build_app(AppState { pool });
        let (status, json) =
            get_json(app, "/workflows/top?platform=youtube&country=US").await;

        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["workflow"].as_str(), Some("v-high"));
        assert_eq!(items[1]["workflow"].as_str(), Some("v-low"));

        let metrics = &items[0]["popularity_metrics"];
        assert_eq!(metrics["views"].as_i64(), Some(1000));
        assert_eq!(metrics["likes"].as_i64(), Some(100));
        assert_eq!(metrics["comments"].as_i64(), Some(10));
        assert!((metrics["like_to_view_ratio"].as_f64().unwrap() - 0.1).abs() < f64::EPSILON);
        assert!((metrics["popularity_score"].as_f64().unwrap() - 0.9).abs() < f64::EPSILON);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn top_honors_limit_and_offset(pool: sqlx::PgPool) {
        for (i, source_id) in ["a", "b", "c", "d"].iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            seed_scored(&pool, "youtube", source_id, "US", 1.0 - i as f64 * 0.1).await;
        }

        let app = build_app(AppState { pool });
        let (status, json) =
            get_json(app, "/workflows/top?platform=youtube&country=US&limit=2&offset=1").await;

        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["workflow"].as_str(), Some("b"));
        assert_eq!(items[1]["workflow"].as_str(), Some("c"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn unknown_platform_yields_empty_list_not_error(pool: sqlx::PgPool) {
        seed_scored(&pool, "youtube", "v1", "US", 0.5).await;

        let app = build_app(AppState { pool });
        let (status, json) =
            get_json(app, "/workflows/top?platform=tiktok&country=US").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn missing_filters_yield_empty_list(pool: sqlx::PgPool) {
        seed_scored(&pool, "youtube", "v1", "US", 0.5).await;

        let app = build_app(AppState { pool });

        let (status, json) = get_json(app.clone(), "/workflows/top").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(0));

        let (status, json) = get_json(app, "/workflows/top?platform=youtube").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_reports_database_up(pool: sqlx::PgPool) {
        let app = build_app(AppState { pool });
        let (status, json) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"].as_str(), Some("ok"));
        assert_eq!(json["database"].as_str(), Some("up"));
    }
}

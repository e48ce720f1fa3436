//! Offline unit tests for flowpulse-db pool configuration and row types.
//! These tests do not require a live database connection.

use flowpulse_core::{AppConfig, Environment};
use flowpulse_db::{InsertOutcome, PoolConfig, WorkflowRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        keywords_path: PathBuf::from("./config/keywords.yaml"),
        youtube_api_key: None,
        search_query: "n8n workflow".to_string(),
        youtube_max_results: 25,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        request_timeout_secs: 30,
        user_agent: "ua".to_string(),
        unit_delay_ms_min: 0,
        unit_delay_ms_max: 0,
        throttle_cooldown_secs: 15,
        max_retries: 3,
        retry_backoff_base_ms: 1000,
        trends_timeframe: "today 90-d".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`WorkflowRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn workflow_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = WorkflowRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        workflow_name: "n8n workflow tutorial".to_string(),
        platform: "youtube".to_string(),
        source_id: "vid-1".to_string(),
        country: "US".to_string(),
        views: 1000_i64,
        likes: 100_i64,
        comments: 10_i64,
        like_to_view_ratio: 0.1_f64,
        comment_to_view_ratio: 0.01_f64,
        popularity_score: 0.0_f64,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.platform, "youtube");
    assert_eq!(row.country, "US");
    assert!((row.like_to_view_ratio - 0.1).abs() < f64::EPSILON);
    assert!((row.popularity_score - 0.0).abs() < f64::EPSILON);
}

#[test]
fn insert_outcome_distinguishes_conflict() {
    assert_eq!(InsertOutcome::Inserted(5), InsertOutcome::Inserted(5));
    assert_ne!(InsertOutcome::Inserted(5), InsertOutcome::Conflict);
}

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("FLOWPULSE_ENV", "development"));

    let bind_addr = parse_addr("FLOWPULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FLOWPULSE_LOG_LEVEL", "info");
    let keywords_path = PathBuf::from(or_default(
        "FLOWPULSE_KEYWORDS_PATH",
        "./config/keywords.yaml",
    ));
    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok();
    let search_query = or_default("FLOWPULSE_SEARCH_QUERY", "n8n workflow");
    let youtube_max_results = parse_u32("FLOWPULSE_YOUTUBE_MAX_RESULTS", "25")?;

    let db_max_connections = parse_u32("FLOWPULSE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("FLOWPULSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("FLOWPULSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let request_timeout_secs = parse_u64("FLOWPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FLOWPULSE_USER_AGENT", "flowpulse/0.1 (workflow-popularity)");

    let unit_delay_ms_min = parse_u64("FLOWPULSE_UNIT_DELAY_MS_MIN", "5000")?;
    let unit_delay_ms_max = parse_u64("FLOWPULSE_UNIT_DELAY_MS_MAX", "9000")?;
    if unit_delay_ms_min > unit_delay_ms_max {
        return Err(ConfigError::InvalidEnvVar {
            var: "FLOWPULSE_UNIT_DELAY_MS_MIN".to_string(),
            reason: format!(
                "minimum delay {unit_delay_ms_min}ms exceeds maximum {unit_delay_ms_max}ms"
            ),
        });
    }
    let throttle_cooldown_secs = parse_u64("FLOWPULSE_THROTTLE_COOLDOWN_SECS", "15")?;
    let max_retries = parse_u32("FLOWPULSE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("FLOWPULSE_RETRY_BACKOFF_BASE_MS", "1000")?;
    let trends_timeframe = or_default("FLOWPULSE_TRENDS_TIMEFRAME", "today 90-d");

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        keywords_path,
        youtube_api_key,
        search_query,
        youtube_max_results,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        user_agent,
        unit_delay_ms_min,
        unit_delay_ms_max,
        throttle_cooldown_secs,
        max_retries,
        retry_backoff_base_ms,
        trends_timeframe,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

use thiserror::Error;

mod app_config;
mod config;
pub mod keywords;
mod metrics;
mod platform;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{load_keywords, KeywordsFile};
pub use metrics::{AdapterItem, RawMetrics};
pub use platform::Platform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid keywords file {path}: {reason}")]
    InvalidKeywordsFile { path: String, reason: String },
}

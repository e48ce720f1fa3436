use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct KeywordsFile {
    pub keywords: Vec<String>,
}

/// Load and validate the trend keyword list from a YAML file.
///
/// Each keyword becomes one tracked workflow per country, keyed by the
/// keyword itself.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty list, blank keyword, duplicates).
pub fn load_keywords(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidKeywordsFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let file: KeywordsFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidKeywordsFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    validate_keywords(&file).map_err(|reason| ConfigError::InvalidKeywordsFile {
        path: path.display().to_string(),
        reason,
    })?;

    Ok(file.keywords)
}

fn validate_keywords(file: &KeywordsFile) -> Result<(), String> {
    if file.keywords.is_empty() {
        return Err("keyword list must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for keyword in &file.keywords {
        if keyword.trim().is_empty() {
            return Err("keywords must be non-empty".to_string());
        }
        if !seen.insert(keyword.to_lowercase()) {
            return Err(format!("duplicate keyword: '{keyword}'"));
        }
    }

    Ok(())
}

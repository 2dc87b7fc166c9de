//! Environment configuration helpers

use std::path::PathBuf;

/// Load a `.env` file from the working directory (or its parents)
///
/// Variables already present in the process environment win. Returns the
/// path that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        },
        Err(_) => None,
    }
}

/// Read a non-empty environment variable
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read a non-empty environment variable or fall back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

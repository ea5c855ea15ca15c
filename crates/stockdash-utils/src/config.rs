//! Environment-variable helpers for configuration loading

use std::path::PathBuf;

/// Load variables from a `.env` file in the working directory or a parent
///
/// Returns the path of the loaded file. Runs before tracing is set up, so
/// callers log the outcome themselves.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// Read an environment variable, treating blank values as unset
pub fn env_var(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

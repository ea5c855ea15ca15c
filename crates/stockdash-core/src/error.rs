//! Error types for dashboard data operations

use thiserror::Error;

/// Errors raised while talking to the market data service
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        status: u16,
        url: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed base URL or endpoint
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DashboardError {
    /// Whether the service reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::HttpStatus {
            status: 503,
            url: "http://localhost:5000/api/companies".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from http://localhost:5000/api/companies"
        );

        let err = DashboardError::ConfigError("history_days must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: history_days must be greater than 0"
        );
    }

    #[test]
    fn test_not_found_detection() {
        let missing = DashboardError::HttpStatus {
            status: 404,
            url: "http://localhost:5000/api/predict/TCS".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!DashboardError::Other("boom".to_string()).is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DashboardError = parse.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}

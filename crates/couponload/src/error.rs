//! Result and error types for couponload.

use thiserror::Error;

/// Result type for couponload operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while configuring or running a load test.
///
/// Request-level failures (timeouts, resets) are never surfaced here; they
/// are recorded as failed [`crate::Sample`]s instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Run configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Scenario name not present in the registry
    #[error("Unknown scenario '{name}' (known: {known})")]
    UnknownScenario {
        /// Requested name
        name: String,
        /// Comma-separated registered names
        known: String,
    },

    /// Scenario registered twice under the same name
    #[error("Scenario '{name}' is already registered")]
    DuplicateScenario {
        /// Scenario name
        name: String,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Health probe did not get a response
    #[error("Health check against {url} failed: {message}")]
    HealthCheck {
        /// URL probed
        url: String,
        /// Error message
        message: String,
    },

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Create a configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_error() {
        let err = LoadError::invalid_config("users must be at least 1");
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("users must be at least 1"));
    }

    #[test]
    fn test_unknown_scenario_lists_known() {
        let err = LoadError::UnknownScenario {
            name: "nope".to_string(),
            known: "hello-world, issue-coupon-async".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("hello-world"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LoadError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}

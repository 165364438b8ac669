//! Run and timeout configuration.

use crate::error::{LoadError, LoadResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default connection and network timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Per-scenario timeout settings, fixed when the scenario is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// Window for establishing the connection (TCP + TLS)
    pub connect_secs: u64,
    /// Window for the complete response
    pub network_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_TIMEOUT_SECS,
            network_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Timeouts {
    /// Create timeouts from whole seconds
    #[must_use]
    pub const fn new(connect_secs: u64, network_secs: u64) -> Self {
        Self {
            connect_secs,
            network_secs,
        }
    }

    /// Connection window
    #[must_use]
    pub const fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    /// Response window
    #[must_use]
    pub const fn network(&self) -> Duration {
        Duration::from_secs(self.network_secs)
    }

    /// Reject zero-length windows.
    pub fn validate(&self) -> LoadResult<()> {
        if self.connect_secs == 0 {
            return Err(LoadError::invalid_config("connect timeout must be positive"));
        }
        if self.network_secs == 0 {
            return Err(LoadError::invalid_config("network timeout must be positive"));
        }
        Ok(())
    }
}

/// Configuration for one load-test run.
///
/// Loaded from YAML or assembled from CLI flags; every field has a default so
/// a file may set only what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Base URL of the target service
    pub host: String,
    /// Number of simulated users
    pub users: usize,
    /// Run length in seconds (0 = bounded by iterations only)
    pub duration_secs: u64,
    /// Per-user invocation cap
    pub iterations: Option<u64>,
    /// Base seed for per-user RNGs (user `i` gets `seed + i`)
    pub seed: Option<u64>,
    /// Scenarios to run, assigned to users round-robin
    pub scenarios: Vec<String>,
    /// Connection and network timeouts applied to every scenario
    pub timeouts: Timeouts,
    /// Probe the target before starting
    pub health_check: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8080".to_string(),
            users: 1,
            duration_secs: 30,
            iterations: None,
            seed: None,
            scenarios: vec!["issue-coupon-async".to_string()],
            timeouts: Timeouts::default(),
            health_check: true,
        }
    }
}

impl RunConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set number of simulated users
    #[must_use]
    pub const fn with_users(mut self, users: usize) -> Self {
        self.users = users;
        self
    }

    /// Set run duration
    #[must_use]
    pub const fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set per-user iteration cap
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set RNG seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set scenarios to run
    #[must_use]
    pub fn with_scenarios<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenarios = scenarios.into_iter().map(Into::into).collect();
        self
    }

    /// Set timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Enable or disable the pre-flight health probe
    #[must_use]
    pub const fn with_health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Host with any trailing slash removed
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Run length, or `None` when only the iteration cap bounds the run
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        if self.duration_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.duration_secs))
        }
    }

    /// Check that the run is well-formed and bounded.
    pub fn validate(&self) -> LoadResult<()> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(LoadError::invalid_config(format!(
                "host must start with http:// or https://, got '{}'",
                self.host
            )));
        }
        if self.users == 0 {
            return Err(LoadError::invalid_config("users must be at least 1"));
        }
        if self.scenarios.is_empty() {
            return Err(LoadError::invalid_config("at least one scenario is required"));
        }
        if self.iterations == Some(0) {
            return Err(LoadError::invalid_config("iterations must be at least 1"));
        }
        if self.duration_secs == 0 && self.iterations.is_none() {
            return Err(LoadError::invalid_config(
                "run is unbounded: set a duration or an iteration cap",
            ));
        }
        self.timeouts.validate()
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> LoadResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let t = Timeouts::default();
        assert_eq!(t.connect(), Duration::from_secs(10));
        assert_eq!(t.network(), Duration::from_secs(10));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Timeouts::new(0, 10).validate().is_err());
        assert!(Timeouts::new(10, 0).validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.users, 1);
        assert_eq!(config.scenarios, vec!["issue-coupon-async".to_string()]);
    }

    #[test]
    fn test_builder_chain() {
        let config = RunConfig::new()
            .with_host("http://127.0.0.1:9000/")
            .with_users(8)
            .with_duration_secs(0)
            .with_iterations(100)
            .with_seed(42)
            .with_scenarios(["hello-world"])
            .with_health_check(false);
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.users, 8);
        assert_eq!(config.duration(), None);
        assert_eq!(config.iterations, Some(100));
        assert_eq!(config.seed, Some(42));
        assert!(!config.health_check);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let config = RunConfig::new().with_host("localhost:8080");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_validate_rejects_zero_users() {
        assert!(RunConfig::new().with_users(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_run() {
        let config = RunConfig::new().with_duration_secs(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unbounded"));
    }

    #[test]
    fn test_validate_rejects_empty_scenarios() {
        let config = RunConfig::new().with_scenarios(Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
host: "http://coupon-api:8080"
users: 50
scenarios:
  - hello-world
  - issue-coupon-async
timeouts:
  connect_secs: 5
  network_secs: 20
"#;
        let config = RunConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.host, "http://coupon-api:8080");
        assert_eq!(config.users, 50);
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.timeouts, Timeouts::new(5, 20));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, "users: 3\nseed: 9\n").unwrap();
        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.users, 3);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RunConfig::load(Path::new("/nonexistent/run.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}

//! Client configuration

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the API client and the push connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the REST API (default: http://localhost:3001)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the push event service (default: http://localhost:3001)
    #[serde(default = "default_sse_base_url")]
    pub sse_base_url: String,

    /// Team whose events are followed
    #[serde(default)]
    pub team_id: Option<String>,

    /// Id of the signed-in user, used to detect workspace membership changes
    #[serde(default)]
    pub user_id: Option<String>,

    /// Bearer token attached to API requests and the push connection
    #[serde(default)]
    pub access_token: Option<String>,

    /// First reconnect delay in milliseconds (default: 500)
    #[serde(default = "default_reconnect_initial_ms")]
    pub reconnect_initial_ms: u64,

    /// Upper bound of the reconnect delay in milliseconds (default: 10 minutes)
    #[serde(default = "default_reconnect_max_ms")]
    pub reconnect_max_ms: u64,

    /// Timeout for REST requests in seconds (default: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_sse_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_reconnect_initial_ms() -> u64 {
    500
}

fn default_reconnect_max_ms() -> u64 {
    600_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            sse_base_url: default_sse_base_url(),
            team_id: None,
            user_id: None,
            access_token: None,
            reconnect_initial_ms: default_reconnect_initial_ms(),
            reconnect_max_ms: default_reconnect_max_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from `TEAMHUB_*` environment variables
    pub fn from_env() -> SyncResult<Self> {
        let api_base_url =
            std::env::var("TEAMHUB_API_URL").unwrap_or_else(|_| default_api_base_url());
        // The push service usually lives next to the API
        let sse_base_url = std::env::var("TEAMHUB_SSE_URL").unwrap_or_else(|_| api_base_url.clone());
        let team_id = non_empty_var("TEAMHUB_TEAM_ID");
        let user_id = non_empty_var("TEAMHUB_USER_ID");
        let access_token = non_empty_var("TEAMHUB_ACCESS_TOKEN");
        let reconnect_initial_ms = std::env::var("TEAMHUB_RECONNECT_INITIAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_reconnect_initial_ms);
        let reconnect_max_ms = std::env::var("TEAMHUB_RECONNECT_MAX_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_reconnect_max_ms);
        let request_timeout_secs = std::env::var("TEAMHUB_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        let config = Self {
            api_base_url,
            sse_base_url,
            team_id,
            user_id,
            access_token,
            reconnect_initial_ms,
            reconnect_max_ms,
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: SyncConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the stream cannot run with
    pub fn validate(&self) -> SyncResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(SyncError::Config("api_base_url must not be empty".into()));
        }
        if self.sse_base_url.trim().is_empty() {
            return Err(SyncError::Config("sse_base_url must not be empty".into()));
        }
        if self.reconnect_initial_ms == 0 {
            return Err(SyncError::Config(
                "reconnect_initial_ms must be greater than zero".into(),
            ));
        }
        if self.reconnect_max_ms < self.reconnect_initial_ms {
            return Err(SyncError::Config(format!(
                "reconnect_max_ms ({}) is lower than reconnect_initial_ms ({})",
                self.reconnect_max_ms, self.reconnect_initial_ms
            )));
        }
        Ok(())
    }

    pub fn reconnect_initial(&self) -> Duration {
        Duration::from_millis(self.reconnect_initial_ms)
    }

    pub fn reconnect_max(&self) -> Duration {
        Duration::from_millis(self.reconnect_max_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.reconnect_initial(), Duration::from_millis(500));
        assert_eq!(config.reconnect_max(), Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "https://hub.example.com"
sse_base_url = "https://events.example.com"
team_id = "team-1"
reconnect_initial_ms = 250
"#
        )
        .unwrap();

        let config = SyncConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://hub.example.com");
        assert_eq!(config.sse_base_url, "https://events.example.com");
        assert_eq!(config.team_id.as_deref(), Some("team-1"));
        assert_eq!(config.reconnect_initial_ms, 250);
        assert_eq!(config.reconnect_max_ms, 600_000);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_from_file_rejects_inverted_backoff() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reconnect_initial_ms = 1000\nreconnect_max_ms = 10").unwrap();

        let err = SyncConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    const ENV_KEYS: [&str; 8] = [
        "TEAMHUB_API_URL",
        "TEAMHUB_SSE_URL",
        "TEAMHUB_TEAM_ID",
        "TEAMHUB_USER_ID",
        "TEAMHUB_ACCESS_TOKEN",
        "TEAMHUB_RECONNECT_INITIAL_MS",
        "TEAMHUB_RECONNECT_MAX_MS",
        "TEAMHUB_REQUEST_TIMEOUT_SECS",
    ];

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let kvs: Vec<(&str, Option<&str>)> = ENV_KEYS
            .iter()
            .map(|key| {
                let value = vars.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();
        temp_env::with_vars(kvs, f)
    }

    #[test]
    #[serial]
    fn test_from_env_sse_falls_back_to_api() {
        let config = with_env(
            &[
                ("TEAMHUB_API_URL", "https://hub.example.com"),
                ("TEAMHUB_TEAM_ID", "team-1"),
                ("TEAMHUB_ACCESS_TOKEN", "  "),
                ("TEAMHUB_RECONNECT_MAX_MS", "5000"),
            ],
            SyncConfig::from_env,
        )
        .unwrap();

        assert_eq!(config.sse_base_url, "https://hub.example.com");
        assert_eq!(config.team_id.as_deref(), Some("team-1"));
        assert!(config.access_token.is_none());
        assert_eq!(config.reconnect_max(), Duration::from_secs(5));
        assert_eq!(config.reconnect_initial(), Duration::from_millis(500));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_inverted_backoff() {
        let result = with_env(
            &[
                ("TEAMHUB_RECONNECT_INITIAL_MS", "2000"),
                ("TEAMHUB_RECONNECT_MAX_MS", "100"),
            ],
            SyncConfig::from_env,
        );
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = SyncConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}

//! Configuration management for the client.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use twocaptcha_common::SolverError;
use twocaptcha_common::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRIEVE_URL, DEFAULT_SOFT_ID, DEFAULT_SUBMIT_URL,
};

/// Environment variable prefix, e.g. `TWOCAPTCHA_API_KEY`
pub const ENV_PREFIX: &str = "TWOCAPTCHA";

/// Client configuration
#[derive(Clone, Deserialize)]
pub struct SolverConfig {
    /// Account API key
    pub api_key: String,

    /// Submission endpoint
    #[serde(default = "default_submit_url")]
    pub submit_url: String,

    /// Retrieval endpoint, also used for reports
    #[serde(default = "default_retrieve_url")]
    pub retrieve_url: String,

    /// Client identifier sent with submissions
    #[serde(default = "default_soft_id")]
    pub soft_id: String,

    /// Poll budget and delay
    #[serde(default)]
    pub poll: PollPolicy,

    /// Per-request transport timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Retry budget and inter-attempt delay of a submit-and-poll sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PollPolicy {
    /// Maximum requests per sequence
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before every request but the first, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

// Default value functions
fn default_submit_url() -> String { DEFAULT_SUBMIT_URL.to_string() }
fn default_retrieve_url() -> String { DEFAULT_RETRIEVE_URL.to_string() }
fn default_soft_id() -> String { DEFAULT_SOFT_ID.to_string() }
fn default_request_timeout() -> u64 { DEFAULT_REQUEST_TIMEOUT_SECS }
fn default_max_attempts() -> u32 { DEFAULT_MAX_ATTEMPTS }
fn default_delay_ms() -> u64 { DEFAULT_POLL_DELAY_MS } // 5 seconds

impl SolverConfig {
    /// Config with the given key and defaults everywhere else
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            submit_url: default_submit_url(),
            retrieve_url: default_retrieve_url(),
            soft_id: default_soft_id(),
            poll: PollPolicy::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Point both endpoints somewhere else (proxies, test servers)
    pub fn with_endpoints(
        mut self,
        submit_url: impl Into<String>,
        retrieve_url: impl Into<String>,
    ) -> Self {
        self.submit_url = submit_url.into();
        self.retrieve_url = retrieve_url.into();
        self
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load configuration from an optional file, with environment overrides.
    ///
    /// Environment variables use the `TWOCAPTCHA_` prefix and `__` for
    /// nesting, e.g. `TWOCAPTCHA_POLL__DELAY_MS=1000`.
    pub fn load(config_path: Option<&str>) -> Result<Self, SolverError> {
        Self::load_with_env(config_path, Self::environment())
    }

    /// The `TWOCAPTCHA_` environment source read by [`load`](Self::load)
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Like [`load`](Self::load), layering the given environment source
    /// over the file instead of the process environment.
    pub fn load_with_env(
        config_path: Option<&str>,
        env: config::Environment,
    ) -> Result<Self, SolverError> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(env)
            .build()
            .map_err(|e| SolverError::Config(format!("Failed to load config: {e}")))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| SolverError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;

        tracing::debug!(
            submit_url = %config.submit_url,
            retrieve_url = %config.retrieve_url,
            max_attempts = config.poll.max_attempts,
            delay_ms = config.poll.delay_ms,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load `.env` (if present) into the process environment, then read
    /// configuration from the environment alone.
    pub fn from_env() -> Result<Self, SolverError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(SolverError::Config(format!("Failed to read .env: {e}")));
            }
        }
        Self::load(None)
    }

    fn validate(&self) -> Result<(), SolverError> {
        if self.api_key.trim().is_empty() {
            return Err(SolverError::Config("api_key must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("api_key", &"<redacted>")
            .field("submit_url", &self.submit_url)
            .field("retrieve_url", &self.retrieve_url)
            .field("soft_id", &self.soft_id)
            .field("poll", &self.poll)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SolverConfig::environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = SolverConfig::new("abc");
        assert_eq!(config.submit_url, "https://2captcha.com/in.php");
        assert_eq!(config.retrieve_url, "https://2captcha.com/res.php");
        assert_eq!(config.soft_id, "2099");
        assert_eq!(config.poll.max_attempts, 20);
        assert_eq!(config.poll.delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let file = write_config(
            r#"
api_key = "file-key"

[poll]
max_attempts = 3
"#,
        );
        let path = file.path().to_str().expect("utf-8 path");

        let config = SolverConfig::load_with_env(Some(path), env(&[])).expect("config loads");
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.poll.max_attempts, 3);
        assert_eq!(config.poll.delay_ms, 5_000);
        assert_eq!(config.submit_url, DEFAULT_SUBMIT_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let file = write_config("api_key = \"  \"\n");
        let path = file.path().to_str().expect("utf-8 path");

        let err = SolverConfig::load_with_env(Some(path), env(&[])).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config(
            r#"
api_key = "file-key"

[poll]
max_attempts = 3
delay_ms = 2000
"#,
        );
        let path = file.path().to_str().expect("utf-8 path");
        let vars = [
            ("TWOCAPTCHA_API_KEY", "env-key"),
            ("TWOCAPTCHA_POLL__DELAY_MS", "10"),
        ];

        let config = SolverConfig::load_with_env(Some(path), env(&vars)).expect("config loads");
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.poll.delay_ms, 10);
        assert_eq!(config.poll.max_attempts, 3);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let err = SolverConfig::load_with_env(None, env(&[])).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn test_poll_delay_saturates() {
        let policy = PollPolicy::new(1, Duration::MAX);
        assert_eq!(policy.delay_ms, u64::MAX);

        let policy = PollPolicy::new(1, Duration::from_millis(1500));
        assert_eq!(policy.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SolverConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}

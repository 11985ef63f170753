//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::csrf::CsrfToken;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pending-order poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Client configuration for talking to the ordering server
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BOWL_BASE_URL | http://localhost:8080 | Server base URL |
/// | BOWL_TIMEOUT_SECS | 10 | Per-request timeout |
/// | BOWL_POLL_INTERVAL_SECS | 30 | Pending-order poll interval |
/// | BOWL_WORK_DIR | .bowl | Session cache and log directory root |
/// | BOWL_LOG_LEVEL | info | Log level |
/// | BOWL_LOG_DIR | (unset) | Write logs to a daily file in this dir |
/// | BOWL_CSRF_TOKEN / BOWL_CSRF_HEADER | (unset) | Fixed CSRF credential |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Abort each request after this long
    pub timeout: Duration,

    /// Interval of the pending-order poller
    pub poll_interval: Duration,

    /// CSRF credential replayed on state-changing requests
    pub csrf: Option<CsrfToken>,

    /// Working directory for the session cache
    pub work_dir: PathBuf,

    pub log_level: String,

    pub log_dir: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            csrf: None,
            work_dir: PathBuf::from(".bowl"),
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("BOWL_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Some(secs) = env_parse::<u64>("BOWL_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>("BOWL_POLL_INTERVAL_SECS") {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Ok(dir) = std::env::var("BOWL_WORK_DIR") {
            config.work_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("BOWL_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_dir = std::env::var("BOWL_LOG_DIR").ok();
        if let (Ok(token), Ok(header)) = (
            std::env::var("BOWL_CSRF_TOKEN"),
            std::env::var("BOWL_CSRF_HEADER"),
        ) {
            config.csrf = Some(CsrfToken::new(header, token));
        }
        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_csrf(mut self, csrf: CsrfToken) -> Self {
        self.csrf = Some(csrf);
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Where the last-known identity is cached
    pub fn session_cache_path(&self) -> PathBuf {
        self.work_dir.join("session.json")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://127.0.0.1:9000")
            .with_timeout(Duration::from_millis(250))
            .with_poll_interval(Duration::from_secs(5))
            .with_work_dir("/tmp/bowl");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.session_cache_path(), PathBuf::from("/tmp/bowl/session.json"));
        assert!(config.csrf.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.log_level, "info");
    }
}

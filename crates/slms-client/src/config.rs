//! Configuration for backend access

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8000`
    pub api_base_url: String,

    /// Path prefix every endpoint lives under
    pub api_prefix: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Where the session (token and user) is persisted
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            session_path: default_session_path(None),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from `SLMS_API_BASE_URL`, `SLMS_API_TIMEOUT_MS` and `SLMS_SESSION_PATH`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        ClientConfigBuilder::from_lookup(lookup).build()
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api_base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL endpoints are joined onto, e.g. `http://localhost:8000/api`
    pub fn api_root(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/')
        )
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{path}", self.api_root()))?)
    }
}

fn default_session_path(home: Option<&str>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".slms").join("session.json"),
        None => PathBuf::from(".slms-session.json"),
    }
}

/// Builder for [`ClientConfig`]
///
/// Nothing is validated until [`build`](Self::build), so later setters can
/// replace values loaded from the environment.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_base_url: Option<String>,
    api_prefix: Option<String>,
    /// `Err` holds an unparseable timeout until a setter replaces it
    timeout: Option<std::result::Result<Duration, String>>,
    session_path: Option<PathBuf>,
}

impl ClientConfigBuilder {
    /// Seed a builder from `SLMS_API_BASE_URL`, `SLMS_API_TIMEOUT_MS` and
    /// `SLMS_SESSION_PATH` without validating them
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::default();

        if let Some(url) = lookup("SLMS_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.api_base_url(url.trim());
        }
        if let Some(ms) = lookup("SLMS_API_TIMEOUT_MS") {
            builder.timeout = Some(
                ms.trim()
                    .parse()
                    .map(Duration::from_millis)
                    .map_err(|_| format!("SLMS_API_TIMEOUT_MS must be an integer, got '{ms}'")),
            );
        }
        let session_path = match lookup("SLMS_SESSION_PATH").filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_path(lookup("HOME").as_deref()),
        };

        builder.session_path(session_path)
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(Ok(timeout));
        self
    }

    pub fn session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();
        let timeout = match self.timeout {
            Some(Ok(timeout)) => timeout,
            Some(Err(message)) => return Err(ClientError::Config(message)),
            None => defaults.timeout,
        };

        let config = ClientConfig {
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            api_prefix: self.api_prefix.unwrap_or(defaults.api_prefix),
            timeout,
            session_path: self.session_path.unwrap_or(defaults.session_path),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root(), "http://localhost:8000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .api_base_url("https://slms.example.edu/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(config.api_root(), "https://slms.example.edu/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint() {
        let config = ClientConfig::default();
        let url = config.endpoint("/students/42/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/students/42/");
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            ClientConfig::builder().api_base_url("not a url").build(),
            Err(ClientError::Url(_))
        ));
        assert!(matches!(
            ClientConfig::builder().api_base_url("ftp://files").build(),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::builder().timeout(Duration::ZERO).build(),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SLMS_API_BASE_URL", "http://10.0.0.5:9000"),
            ("SLMS_API_TIMEOUT_MS", "1500"),
            ("HOME", "/home/registrar"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(
            config.session_path,
            PathBuf::from("/home/registrar/.slms/session.json")
        );
    }

    #[test]
    fn test_from_lookup_session_path_override() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SLMS_SESSION_PATH", "/tmp/s.json"),
            ("HOME", "/home/x"),
        ]))
        .unwrap();
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_setters_replace_invalid_env_values() {
        let env = lookup(&[
            ("SLMS_API_BASE_URL", "not a url"),
            ("SLMS_API_TIMEOUT_MS", "0"),
        ]);
        assert!(ClientConfigBuilder::from_lookup(&env).build().is_err());

        let config = ClientConfigBuilder::from_lookup(&env)
            .api_base_url("http://127.0.0.1:8000")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config = ClientConfigBuilder::from_lookup(lookup(&[("SLMS_API_TIMEOUT_MS", "soon")]))
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("SLMS_API_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("SLMS_API_TIMEOUT_MS"));
    }
}

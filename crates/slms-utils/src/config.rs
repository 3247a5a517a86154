//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Optional UI features that can be switched off per deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Dark theme for generated HTML pages
    pub dark_mode: bool,
    /// Notification center and bell
    pub notifications: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, etc.)
    pub environment: String,
    /// Feature switches
    #[serde(default)]
    pub features: FeatureFlags,
}

impl Config {
    /// Whether verbose diagnostics should be enabled
    pub fn is_debug(&self) -> bool {
        self.environment == "development"
    }

    /// Default log filter for this environment
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_debug() {
            "debug"
        } else {
            "info"
        }
    }

    /// Build from a variable lookup (`SLMS_ENV`, `SLMS_DISABLE_NOTIFICATIONS`)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(env) = lookup("SLMS_ENV") {
            config.environment = env;
        }
        if lookup("SLMS_DISABLE_NOTIFICATIONS").is_some_and(|v| is_truthy(&v)) {
            config.features.notifications = false;
        }
        if lookup("SLMS_DISABLE_DARK_MODE").is_some_and(|v| is_truthy(&v)) {
            config.features.dark_mode = false;
        }
        config
    }

    /// Build from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "slms".to_string(),
            environment: "development".to_string(),
            features: FeatureFlags::default(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

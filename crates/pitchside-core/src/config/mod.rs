//! Configuration module for pitchside.
//!
//! Loads typed configuration from `~/.pitchside/config.json`.
//! Every section is defaulted, so a missing file or a partial file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::tools::FOOTBALL_TOOL_NAMES;

/// Environment variable that overrides `api.apiKey`.
pub const API_KEY_ENV: &str = "PITCHSIDE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "http://v3.football.api-sports.io";
pub const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub tools: ToolsConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default path (`~/.pitchside/config.json`).
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get the default config directory path.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pitchside")
    }

    /// Write the default config template to `path`.
    pub fn write_default_template(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = serde_json::json!({
            "api": {
                "baseUrl": DEFAULT_BASE_URL,
                "host": DEFAULT_API_HOST,
                "apiKey": "YOUR_API_SPORTS_KEY",
                "timeoutSeconds": DEFAULT_TIMEOUT_SECONDS
            },
            "tools": {
                "enabled": FOOTBALL_TOOL_NAMES
            },
            "server": {
                "name": "football"
            }
        });

        std::fs::write(path, serde_json::to_string_pretty(&template)?)?;
        Ok(())
    }

    /// Check the configuration, collecting every problem found.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let base = self.api.base_url.trim();
        if base.is_empty() {
            errors.push("api.baseUrl is empty. Point it at the football API host.".into());
        } else if !(base.starts_with("http://") || base.starts_with("https://")) {
            errors.push(format!(
                "api.baseUrl '{}' must start with http:// or https://",
                base
            ));
        }

        if self.api.timeout_seconds == 0 {
            errors.push("api.timeoutSeconds must be greater than zero.".into());
        }

        for name in &self.tools.enabled {
            if !FOOTBALL_TOOL_NAMES.contains(&name.as_str()) {
                errors.push(format!(
                    "tools.enabled lists unknown tool '{}'. Known tools: {}",
                    name,
                    FOOTBALL_TOOL_NAMES.join(", ")
                ));
            }
        }

        if self.server.name.trim().is_empty() {
            errors.push("server.name is empty.".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ── API Configuration ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    /// Value sent in the `x-rapidapi-host` header.
    pub host: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            host: DEFAULT_API_HOST.into(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Resolve the API key. Priority: `PITCHSIDE_API_KEY` > config file.
    pub fn resolved_api_key(&self) -> String {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), &self.api_key)
    }

    fn pick_api_key(env_value: Option<String>, configured: &str) -> String {
        match env_value {
            Some(key) if !key.is_empty() => key,
            _ => configured.to_string(),
        }
    }

    /// Whether the configured key is missing or still the onboarding placeholder.
    pub fn has_placeholder_key(&self) -> bool {
        let key = self.resolved_api_key();
        key.is_empty() || key.contains("YOUR_")
    }
}

// ── Tools Configuration ─────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Names of the tools exposed to the host.
    pub enabled: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: FOOTBALL_TOOL_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ToolsConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|n| n == name)
    }
}

// ── Server Configuration ────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Name reported to the host in `serverInfo`.
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "football".into(),
        }
    }
}

//! Configuration management for the Logibooks client.
//!
//! Every setting is resolved independently with the precedence
//! runtime-injected file > environment variable > built-in fallback.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend address.
pub const ENV_API_URL: &str = "LOGIBOOKS_API_URL";

/// Environment variable toggling request logging.
pub const ENV_ENABLE_LOG: &str = "LOGIBOOKS_ENABLE_LOG";

/// Settings injected at runtime, typically from `config.toml`.
///
/// Every field is optional: a missing field defers to the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Backend base URL, e.g. `https://logibooks.example.com/api`
    pub api_url: Option<String>,
    /// Whether request logging is enabled
    pub enable_log: Option<bool>,
}

impl RuntimeConfig {
    /// Load the runtime config from the platform config directory.
    ///
    /// Returns `Ok(None)` when no file exists (first run, or not injected).
    pub fn load() -> ConfigResult<Option<Self>> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path).map(Some)
        } else {
            tracing::debug!("Runtime config not found at {}", path.display());
            Ok(None)
        }
    }

    /// Load the runtime config from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        tracing::debug!("Loading runtime config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save the runtime config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Path of the runtime config file: `~/.config/logibooks/config.toml`.
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub api_url: String,
    /// Whether request logging is enabled
    pub enable_log: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            enable_log: false,
        }
    }
}

impl ClientConfig {
    /// Resolve against the process environment.
    #[must_use]
    pub fn resolve(runtime: Option<&RuntimeConfig>) -> Self {
        Self::resolve_with(runtime, |key| std::env::var(key).ok())
    }

    /// Resolve using an explicit environment lookup.
    ///
    /// Empty URLs and unparsable flags are skipped so the next source wins.
    #[must_use]
    pub fn resolve_with<F>(runtime: Option<&RuntimeConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime_url = runtime
            .and_then(|rt| rt.api_url.as_deref())
            .and_then(non_empty);
        let env_url = env(ENV_API_URL);
        let api_url = match runtime_url {
            Some(url) => url.to_string(),
            None => match env_url.as_deref().and_then(non_empty) {
                Some(url) => {
                    tracing::debug!("Override api_url from env: {}", url);
                    url.to_string()
                }
                None => DEFAULT_API_URL.to_string(),
            },
        };

        let enable_log = runtime
            .and_then(|rt| rt.enable_log)
            .or_else(|| env(ENV_ENABLE_LOG).as_deref().and_then(parse_flag))
            .unwrap_or(false);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            enable_log,
        }
    }

    /// Load the runtime file (if any) and resolve against the environment.
    ///
    /// # Errors
    /// Returns error if the runtime file exists but cannot be read or parsed,
    /// or if the resolved URL is not an http(s) address.
    pub fn load_with_env() -> ConfigResult<Self> {
        let runtime = RuntimeConfig::load()?;
        let config = Self::resolve(runtime.as_ref());
        config.validate()?;
        Ok(config)
    }

    /// Check that the backend URL is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_url.starts_with("http://") || self.api_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "api_url".to_string(),
                reason: format!("must start with http:// or https://, got '{}'", self.api_url),
            })
        }
    }

    /// Join a resource path onto the base URL: `{api_url}/<resource>[/<action>]`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Directory for persisted UI state: `~/.local/share/logibooks/ui-state`.
    pub fn ui_state_dir() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.data_dir().join("ui-state"))
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "logibooks", "logibooks").ok_or(ConfigError::NoConfigDir)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

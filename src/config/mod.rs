use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;

/// Startup failures that stop the program before the REPL starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
}

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/sentiment/config.toml
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Chat model identifier
    pub model: String,
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub api_base_url: String,
    /// Completion token cap
    pub max_tokens: u32,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// UI language (en, es)
    pub lang: String,
    /// Tracing filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            lang: DEFAULT_LANG.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    model: Option<String>,
    api_base_url: Option<String>,
    max_tokens: Option<u32>,
    request_timeout_secs: Option<u64>,
    lang: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// Load config from ~/.config/sentiment/config.toml, falling back to
    /// defaults for any missing fields.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`. A missing file yields pure defaults; an
    /// unparsable one prints a warning and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(),
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Merge a TOML document over the defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.model {
            if !v.trim().is_empty() {
                config.model = v;
            }
        }
        if let Some(v) = file_config.api_base_url {
            if !v.trim().is_empty() {
                config.api_base_url = v;
            }
        }
        if let Some(v) = file_config.max_tokens {
            config.max_tokens = v.clamp(1, MAX_TOKENS_CEILING);
        }
        if let Some(v) = file_config.request_timeout_secs {
            config.request_timeout_secs = v.max(1);
        }
        if let Some(v) = file_config.lang {
            if LANGUAGES.contains(&v.as_str()) {
                config.lang = v;
            }
        }
        if let Some(v) = file_config.log_level {
            if !v.trim().is_empty() {
                config.log_level = v;
            }
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Read the API key from the environment.
    pub fn api_key() -> Result<String, ConfigError> {
        Self::api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey(API_KEY_ENV)),
        }
    }
}

/// Load `.env` files: the working directory first, then
/// `~/.config/sentiment/.env`. Variables already set are never overridden.
pub fn load_env_files() {
    let _ = dotenvy::dotenv();
    load_env_file(&env_file_path());
}

/// Load one `.env` file. Returns whether it was read.
pub fn load_env_file(path: &Path) -> bool {
    dotenvy::from_path(path).is_ok()
}

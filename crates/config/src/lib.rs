//! Configuration loading, validation, and capability resolution for RefSeek.
//!
//! Loads configuration from `~/.refseek/config.toml` with environment
//! variable overrides, then resolves the two capability switches —
//! "is the document index configured?" and "is the completion backend
//! configured?" — **once**, at load time. The core crates never read the
//! environment themselves; they receive explicit capabilities.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.refseek/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per completion response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Completion backend selection and endpoint
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Remote document index configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "gpt-4-turbo-preview".into()
}
fn default_temperature() -> f32 {
    0.1
}
fn default_max_tokens() -> u32 {
    4096
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("provider", &self.provider)
            .field("index", &self.index)
            .field("gateway", &self.gateway)
            .finish()
    }
}

/// Completion backend configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend name: "openai", "openrouter", or "custom"
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Override the API base URL (required for "custom")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_provider_name() -> String {
    "openai".into()
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            api_url: None,
        }
    }
}

/// Remote document index configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the retrieval index. Absent = unconfigured (test mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key for the index, if it requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_index_timeout")]
    pub timeout_secs: u64,
}

fn default_index_timeout() -> u64 {
    30
}

impl std::fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_index_timeout(),
        }
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8642
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// The two capability switches, resolved once at startup.
///
/// `index_configured` selects search vs. test mode; `completion_configured`
/// selects LLM-enhanced vs. search-only responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub index_configured: bool,
    pub completion_configured: bool,
}

impl AppConfig {
    /// Load configuration from the default path (~/.refseek/config.toml).
    ///
    /// Environment variable overrides:
    /// - `REFSEEK_API_KEY` or `OPENAI_API_KEY` — completion credential
    /// - `REFSEEK_INDEX_URL` or `LLAMA_INDEX_URL` — index endpoint
    /// - `REFSEEK_INDEX_API_KEY` — index credential
    /// - `REFSEEK_MODEL` — completion model
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("REFSEEK_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if config.index.base_url.is_none() {
            config.index.base_url = std::env::var("REFSEEK_INDEX_URL")
                .ok()
                .or_else(|| std::env::var("LLAMA_INDEX_URL").ok());
        }

        if config.index.api_key.is_none() {
            config.index.api_key = std::env::var("REFSEEK_INDEX_API_KEY").ok();
        }

        if let Ok(model) = std::env::var("REFSEEK_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".refseek")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.index.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "index.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Resolve the capability switches from this configuration.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            index_configured: self
                .index
                .base_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty()),
            completion_configured: self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty()),
        }
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            provider: ProviderConfig::default(),
            index: IndexConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

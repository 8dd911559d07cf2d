//! # Application Configuration
//!
//! This module defines the configuration structure for the `reelquest-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables.
//!
//! Credentials are optional at load time. A missing catalog or model key only
//! disables the endpoints that need it, which then answer with a
//! configuration error.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use reelquest::providers::catalog::tmdb::{DEFAULT_TMDB_BASE_URL, DEFAULT_TMDB_LANGUAGE};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// The default OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_MODEL_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The default chat model.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    pub port: u16,
    /// Credential for the media catalog. Loaded from `TMDB_API_KEY` env var.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,
    /// Credential for the language model. Loaded from `OPENAI_API_KEY` env var.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Public JavaScript key handed to browser clients. Loaded from `KAKAO_JS_KEY` env var.
    #[serde(default)]
    pub kakao_js_key: Option<String>,
    /// Directory holding the prompt template files. Loaded from `PROMPTS_DIR` env var.
    pub prompts_dir: String,
    pub catalog: CatalogConfig,
    pub model: ModelConfig,
}

/// Where and how to reach the media catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub api_url: String,
    pub language: String,
}

/// Where and how to reach the language model.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub api_url: String,
    pub model_name: String,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Treats blank strings as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from defaults, an optional file and
/// environment variables.
///
/// - Top-level keys are overridden by plain variables (`PORT`, `TMDB_API_KEY`,
///   `OPENAI_API_KEY`, `KAKAO_JS_KEY`, `PROMPTS_DIR`).
/// - Nested keys are overridden by `REELQUEST_...` variables (e.g.,
///   `REELQUEST_MODEL__MODEL_NAME`).
///
/// An explicit `config_path_override` must exist; the default `config.yml` is
/// optional.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("port", 3000)?
        .set_default("prompts_dir", format!("{base_path}/prompts"))?
        .set_default("catalog.api_url", DEFAULT_TMDB_BASE_URL)?
        .set_default("catalog.language", DEFAULT_TMDB_LANGUAGE)?
        .set_default("model.api_url", DEFAULT_MODEL_API_URL)?
        .set_default("model.model_name", DEFAULT_MODEL_NAME)?;

    // Layer 2: Config file.
    let config_path = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            Some((path.to_string(), content))
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            read_and_substitute(&user_config_path)?.map(|content| (user_config_path, content))
        }
    };
    if let Some((path, content)) = config_path {
        info!("Loading configuration from '{path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 3: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("REELQUEST")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.tmdb_api_key = non_blank(config.tmdb_api_key);
    config.openai_api_key = non_blank(config.openai_api_key);
    config.kakao_js_key = non_blank(config.kakao_js_key);

    Ok(config)
}

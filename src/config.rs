use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_base_url: String,
    pub model: String,
    /// Upper bound on one upstream call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    20
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;

        let config: Config =
            toml::from_str(&contents).context("Failed to parse config file as TOML")?;

        Ok(config)
    }
}

/// The Gemini API key. Wrapped so the raw value cannot end up in log
/// output by accident; `reveal` is the only way to read it back and is
/// used solely to build the upstream URL.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        ApiKey(value.into())
    }

    /// Read the key from `GEMINI_API_KEY`. Unset or empty counts as absent.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .map(ApiKey)
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// Log-safe form. Carries only the length, never any part of the value.
    pub fn masked(&self) -> String {
        format!("**** ({} chars)", self.0.len())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

//! CLI configuration file support
//!
//! Loads configuration from ~/.config/chatrelay/config.toml

use chatrelay_ai::RelayConfig;
use chatrelay_ai::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use chatrelay_ai::relay::{DEFAULT_MINIMAL_LATENCY_SECS, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub chatgpt: ChatGptConfig,
}

/// Completion backend and relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatGptConfig {
    /// API key
    pub key: Option<String>,
    /// API base URL (self-hosted or third-party relays)
    pub api: Option<String>,
    /// HTTP(S) proxy URL
    pub proxy: Option<String>,
    /// System prompt sent first in every conversation
    #[serde(default)]
    pub prompt: String,
    /// Minimum seconds per reply
    pub minimal: Option<u64>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ChatGptConfig {
    fn default() -> Self {
        Self {
            key: None,
            api: None,
            proxy: None,
            prompt: String::new(),
            minimal: None,
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from the default location when none is given
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Warning: Failed to parse config: {err}");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("Warning: Failed to read config: {err}");
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chatrelay")
            .join("config.toml")
    }

    /// Fill the key and base URL from the environment when the file leaves them empty
    pub fn apply_env_fallbacks(&mut self) {
        fill_from_env(&mut self.chatgpt.key, "OPENAI_API_KEY");
        fill_from_env(&mut self.chatgpt.api, "OPENAI_API_BASE");
    }
}

impl ChatGptConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    pub fn base_url(&self) -> &str {
        non_empty(&self.api).unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn proxy(&self) -> Option<&str> {
        non_empty(&self.proxy)
    }

    /// `minimal = 0` counts as unset and falls back to the default floor.
    pub fn relay_config(&self) -> RelayConfig {
        let minimal = self
            .minimal
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_MINIMAL_LATENCY_SECS);
        RelayConfig::new(self.prompt.clone())
            .with_minimal_latency(minimal)
            .with_temperature(self.temperature)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn fill_from_env(slot: &mut Option<String>, key: &str) {
    if non_empty(slot).is_some() {
        return;
    }
    if let Some(val) = std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        *slot = Some(val);
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

//! Relay settings: system prompt, latency floor and sampling temperature.

use super::command::clamp_latency;

pub const DEFAULT_MINIMAL_LATENCY_SECS: u64 = 5;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Runtime settings for a [`ChatRelay`](super::ChatRelay).
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub system_prompt: String,
    /// Minimum seconds between receiving a question and answering it.
    pub minimal_latency_secs: u64,
    pub temperature: f32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            minimal_latency_secs: DEFAULT_MINIMAL_LATENCY_SECS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl RelayConfig {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_minimal_latency(mut self, secs: u64) -> Self {
        self.minimal_latency_secs = clamp_latency(secs);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::new("prompt");
        assert_eq!(config.system_prompt, "prompt");
        assert_eq!(config.minimal_latency_secs, 5);
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_latency_is_clamped() {
        assert_eq!(
            RelayConfig::default()
                .with_minimal_latency(600)
                .minimal_latency_secs,
            60
        );
    }
}

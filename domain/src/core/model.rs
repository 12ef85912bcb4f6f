//! Language model settings shared by all participants

use serde::{Deserialize, Serialize};

/// Immutable language-model settings (Value Object)
///
/// Passed into every agent at construction time. There is no process-wide
/// settings object; two agents may run with different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ModelSettings {
    pub const DEFAULT_MODEL: &'static str = "gpt-4";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MODEL).with_temperature(Self::DEFAULT_TEMPERATURE)
    }
}

impl std::fmt::Display for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model)
    }
}

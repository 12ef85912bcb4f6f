//! Language-model configuration from TOML (`[llm]` section)

use super::ConfigValidationError;
use crew_domain::ModelSettings;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileLlmConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Base URL of the API, without the `/chat/completions` suffix
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// HTTP request timeout
    pub timeout_seconds: u64,
    /// Retries for transient failures (connection errors, rate limits, timeouts)
    pub max_retries: u32,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: ModelSettings::DEFAULT_MODEL.to_string(),
            temperature: Some(ModelSettings::DEFAULT_TEMPERATURE),
            max_tokens: None,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
            max_retries: 2,
        }
    }
}

impl FileLlmConfig {
    pub fn to_model_settings(&self) -> Result<ModelSettings, ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        let mut settings = ModelSettings::new(self.model.trim());
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigValidationError::InvalidTemperature(temperature));
            }
            settings = settings.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            settings = settings.with_max_tokens(max_tokens);
        }
        Ok(settings)
    }

    /// The API key, if the configured variable is set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FileLlmConfig::default().to_model_settings().unwrap();
        assert_eq!(settings.model(), "gpt-4");
        assert_eq!(settings.temperature(), Some(0.7));
        assert_eq!(settings.max_tokens(), None);
    }

    #[test]
    fn test_temperature_can_be_omitted() {
        let config: FileLlmConfig = toml::from_str("model = \"gpt-4o\"").unwrap();
        assert_eq!(config.temperature, Some(0.7));

        let config = FileLlmConfig {
            temperature: None,
            max_tokens: Some(512),
            ..Default::default()
        };
        let settings = config.to_model_settings().unwrap();
        assert_eq!(settings.temperature(), None);
        assert_eq!(settings.max_tokens(), Some(512));
    }

    #[test]
    fn test_out_of_range_temperature() {
        let config = FileLlmConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        assert_eq!(
            config.to_model_settings(),
            Err(ConfigValidationError::InvalidTemperature(3.5))
        );
    }

    #[test]
    fn test_missing_api_key_variable() {
        let config = FileLlmConfig {
            api_key_env: "CODECREW_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! values with the `to_*` methods, which is where validation happens.

mod conversation;
mod execution;
mod llm;
mod output;
mod participants;

pub use conversation::FileConversationConfig;
pub use execution::FileExecutionConfig;
pub use llm::FileLlmConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use participants::FileParticipantConfig;

use crew_domain::{DomainError, Participant, Roster};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("{section}.timeout_seconds cannot be 0")]
    InvalidTimeout { section: &'static str },

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("execution.test_command cannot be empty")]
    EmptyTestCommand,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Language-model service settings
    pub llm: FileLlmConfig,
    /// Turn-taking settings
    pub conversation: FileConversationConfig,
    /// Roster; the built-in four participants when empty
    pub participants: Vec<FileParticipantConfig>,
    /// Code execution settings
    pub execution: FileExecutionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Participants in roster order
    pub fn to_participants(&self) -> Result<Vec<Participant>, ConfigValidationError> {
        if self.participants.is_empty() {
            return Ok(Roster::default_participants());
        }
        self.participants
            .iter()
            .map(FileParticipantConfig::to_participant)
            .collect()
    }

    /// Validate the entire configuration, returning every detected problem
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if let Err(e) = self.llm.to_model_settings() {
            issues.push(e);
        }
        if self.llm.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout { section: "llm" });
        }
        if let Err(e) = self.conversation.to_conversation_config() {
            issues.push(e);
        }
        if let Err(e) = self.execution.to_execution_params() {
            issues.push(e);
        }
        match self.to_participants() {
            Ok(participants) => {
                if let Err(e) = Roster::new(participants) {
                    issues.push(e.into());
                }
            }
            Err(e) => issues.push(e),
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{OutputFormat, Role};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
model = "gpt-4o"
temperature = 0.2

[conversation]
max_rounds = 8
selection = "random"
seed = 7
termination_marker = "TERMINATE"

[[participants]]
role = "coordinator"

[[participants]]
role = "generator"
name = "Coder"
max_auto_replies = 2

[execution]
work_dir = "scratch"
timeout_seconds = 30

[output]
format = "summary"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.conversation.max_rounds, 8);
        assert_eq!(config.participants.len(), 2);
        assert_eq!(config.output.format, Some(OutputFormat::Summary));
        assert!(config.validate().is_empty());

        let participants = config.to_participants().unwrap();
        assert_eq!(participants[0].name(), "UserProxyAgent");
        assert_eq!(participants[1].name(), "Coder");
        assert_eq!(participants[1].max_auto_replies(), Some(2));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        let participants = config.to_participants().unwrap();
        assert_eq!(participants.len(), 4);
        assert_eq!(participants[0].role(), Role::Coordinator);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[llm]
model = ""
timeout_seconds = 0

[conversation]
max_rounds = 0

[[participants]]
role = "generator"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert!(issues.contains(&ConfigValidationError::EmptyModelName));
        assert!(issues.contains(&ConfigValidationError::InvalidTimeout { section: "llm" }));
        assert!(issues.contains(&ConfigValidationError::Domain(DomainError::InvalidMaxRounds)));
        assert!(issues.contains(&ConfigValidationError::Domain(
            DomainError::TooFewParticipants { found: 1 }
        )));
    }
}

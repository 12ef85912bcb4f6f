//! Turn-taking configuration from TOML (`[conversation]` section)

use super::ConfigValidationError;
use crew_application::BehaviorConfig;
use crew_domain::{ConversationConfig, MarkerTermination, SpeakerSelection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConversationConfig {
    /// Rounds including the seed turn
    pub max_rounds: usize,
    /// `round_robin` or `random`
    pub selection: String,
    /// Seed for `random` selection
    pub seed: u64,
    /// Phrase that ends the conversation; no phrase means no early stop
    pub termination_marker: Option<String>,
    pub case_sensitive: bool,
    /// Only match the marker at the end of a message
    pub marker_at_end: bool,
    /// Limit for a single participant reply; exceeding it aborts the run
    pub turn_timeout_seconds: Option<u64>,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        Self {
            max_rounds: ConversationConfig::DEFAULT_MAX_ROUNDS,
            selection: "round_robin".to_string(),
            seed: 0,
            termination_marker: None,
            case_sensitive: true,
            marker_at_end: false,
            turn_timeout_seconds: None,
        }
    }
}

impl FileConversationConfig {
    pub fn speaker_selection(&self) -> Result<SpeakerSelection, ConfigValidationError> {
        let selection = match self.selection.parse::<SpeakerSelection>()? {
            SpeakerSelection::Random { .. } => SpeakerSelection::Random { seed: self.seed },
            other => other,
        };
        Ok(selection)
    }

    pub fn termination(&self) -> Option<MarkerTermination> {
        let marker = self.termination_marker.as_deref()?.trim();
        if marker.is_empty() {
            return None;
        }
        let mut termination = MarkerTermination::new(marker);
        if !self.case_sensitive {
            termination = termination.case_insensitive();
        }
        if self.marker_at_end {
            termination = termination.at_end();
        }
        Some(termination)
    }

    pub fn to_conversation_config(&self) -> Result<ConversationConfig, ConfigValidationError> {
        let mut config = ConversationConfig::new(self.max_rounds)
            .with_speaker_selection(self.speaker_selection()?);
        if let Some(termination) = self.termination() {
            config = config.with_termination(termination);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn to_behavior_config(&self) -> Result<BehaviorConfig, ConfigValidationError> {
        if self.turn_timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout {
                section: "conversation.turn",
            });
        }
        Ok(BehaviorConfig::from_timeout_seconds(self.turn_timeout_seconds))
    }
}

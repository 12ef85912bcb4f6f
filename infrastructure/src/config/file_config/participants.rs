//! Roster configuration from TOML (`[[participants]]` array)

use super::ConfigValidationError;
use crew_domain::{Participant, Role};
use serde::{Deserialize, Serialize};

/// One participant; omitted fields fall back to the role's defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileParticipantConfig {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_execute: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_auto_replies: Option<usize>,
}

impl FileParticipantConfig {
    pub fn to_participant(&self) -> Result<Participant, ConfigValidationError> {
        let role: Role = self.role.parse()?;
        let mut participant = match &self.name {
            Some(name) => Participant::new(name.trim(), role),
            None => Participant::for_role(role),
        };
        if let Some(directive) = &self.directive {
            participant = participant.with_directive(directive.as_str());
        }
        if let Some(can_execute) = self.can_execute {
            participant = participant.with_execution(can_execute);
        }
        if let Some(max) = self.max_auto_replies {
            participant = participant.with_max_auto_replies(Some(max));
        }
        Ok(participant)
    }
}

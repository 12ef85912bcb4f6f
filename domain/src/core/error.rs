//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant describes a malformed roster, configuration or task. They are
/// raised eagerly, before the first turn of a conversation is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A conversation needs at least 2 participants, found {found}")]
    TooFewParticipants { found: usize },

    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(String),

    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    #[error("max_rounds must be a positive integer")]
    InvalidMaxRounds,

    #[error("Task description cannot be empty")]
    EmptyTask,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown speaker selection method: {0}")]
    UnknownSpeakerSelection(String),
}

impl DomainError {
    /// Check if this error was caused by the participant roster
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            DomainError::TooFewParticipants { .. }
                | DomainError::DuplicateParticipant(_)
                | DomainError::EmptyParticipantName
        )
    }
}

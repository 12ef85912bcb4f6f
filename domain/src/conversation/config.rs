//! Conversation configuration

use super::selection::SpeakerSelection;
use super::termination::{NeverTerminate, TerminationPredicate};
use crate::core::error::DomainError;
use std::sync::Arc;

/// Settings of one conversation run (Value Object)
///
/// Supplied when the run starts and never changed while it is running.
/// Per-participant reply budgets live on each
/// [`Participant`](crate::participant::entities::Participant).
#[derive(Clone)]
pub struct ConversationConfig {
    /// Total rounds including the seed turn
    pub max_rounds: usize,
    pub speaker_selection: SpeakerSelection,
    pub termination: Arc<dyn TerminationPredicate>,
}

impl ConversationConfig {
    pub const DEFAULT_MAX_ROUNDS: usize = 15;

    pub fn new(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            ..Default::default()
        }
    }

    pub fn with_speaker_selection(mut self, selection: SpeakerSelection) -> Self {
        self.speaker_selection = selection;
        self
    }

    pub fn with_termination(mut self, predicate: impl TerminationPredicate + 'static) -> Self {
        self.termination = Arc::new(predicate);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds == 0 {
            return Err(DomainError::InvalidMaxRounds);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            speaker_selection: SpeakerSelection::RoundRobin,
            termination: Arc::new(NeverTerminate),
        }
    }
}

impl std::fmt::Debug for ConversationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationConfig")
            .field("max_rounds", &self.max_rounds)
            .field("speaker_selection", &self.speaker_selection)
            .field("termination", &self.termination.describe())
            .finish()
    }
}

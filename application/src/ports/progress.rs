//! Progress notification port
//!
//! Defines the interface for reporting progress while a conversation runs.

use crew_domain::{CompletionReason, ConversationState, Participant, Roster, Turn};

/// Callback for progress updates during a conversation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait ConversationProgress: Send + Sync {
    /// Called once the transcript has been seeded
    fn on_conversation_start(&self, _task: &str, _roster: &Roster) {}

    /// Called before a participant starts producing
    fn on_turn_start(&self, round: usize, participant: &Participant);

    /// Called for every appended turn, execution results included
    fn on_turn_complete(&self, turn: &Turn);

    /// Called when a participant without reply budget is passed over
    fn on_speaker_skipped(&self, _skipped: &Participant, _chosen: &Participant) {}

    /// Called once the conversation reaches a terminal state
    fn on_conversation_end(&self, state: ConversationState, reason: Option<CompletionReason>);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConversationProgress for NoProgress {
    fn on_turn_start(&self, _round: usize, _participant: &Participant) {}
    fn on_turn_complete(&self, _turn: &Turn) {}
    fn on_conversation_end(&self, _state: ConversationState, _reason: Option<CompletionReason>) {}
}

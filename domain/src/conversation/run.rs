//! Conversation run lifecycle
//!
//! ```text
//! Init ──start──▶ Running ──complete(reason)──▶ Completed
//!                    │
//!                    └──────abort──────────────▶ Aborted
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle state of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Init,
    Running,
    Completed,
    Aborted,
}

impl ConversationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a conversation completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The round budget was used up
    MaxRounds,
    /// The termination predicate matched the latest turn
    TerminationMarker,
    /// Every participant exhausted its reply budget
    RepliesExhausted,
}

impl CompletionReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::MaxRounds => "round budget exhausted",
            Self::TerminationMarker => "termination marker observed",
            Self::RepliesExhausted => "no participant left with reply budget",
        }
    }
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Tracks the state and round counter of one conversation (Entity)
///
/// Transitions out of a terminal state are ignored, so the first terminal
/// transition wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRun {
    state: ConversationState,
    rounds: usize,
    reason: Option<CompletionReason>,
}

impl ConversationRun {
    pub fn new() -> Self {
        Self {
            state: ConversationState::Init,
            rounds: 0,
            reason: None,
        }
    }

    /// Leave `Init`; the seed turn counts as the first round
    pub fn start(&mut self) {
        if self.state == ConversationState::Init {
            self.state = ConversationState::Running;
            self.rounds = 1;
        }
    }

    pub fn record_round(&mut self) {
        if self.state == ConversationState::Running {
            self.rounds += 1;
        }
    }

    pub fn complete(&mut self, reason: CompletionReason) {
        if !self.state.is_terminal() {
            self.state = ConversationState::Completed;
            self.reason = Some(reason);
        }
    }

    pub fn abort(&mut self) {
        if !self.state.is_terminal() {
            self.state = ConversationState::Aborted;
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.reason
    }

    pub fn is_running(&self) -> bool {
        self.state == ConversationState::Running
    }
}

impl Default for ConversationRun {
    fn default() -> Self {
        Self::new()
    }
}

//! Turn entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a turn contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Content produced by a participant
    Message,
    /// Output of running a code artifact found in the previous message
    ExecutionResult,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Message => "message",
            TurnKind::ExecutionResult => "execution_result",
        }
    }
}

impl std::fmt::Display for TurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attributable contribution to the transcript (Entity)
///
/// Turns are only created by [`Transcript::append`](super::transcript::Transcript::append)
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    sequence: usize,
    speaker: String,
    content: String,
    kind: TurnKind,
    timestamp: DateTime<Utc>,
}

impl Turn {
    pub(crate) fn new(
        sequence: usize,
        speaker: impl Into<String>,
        content: impl Into<String>,
        kind: TurnKind,
    ) -> Self {
        Self {
            sequence,
            speaker: speaker.into(),
            content: content.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> TurnKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_message(&self) -> bool {
        self.kind == TurnKind::Message
    }

    pub fn is_execution_result(&self) -> bool {
        self.kind == TurnKind::ExecutionResult
    }
}

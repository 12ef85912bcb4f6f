//! Termination predicates
//!
//! Whether a turn ends the conversation is a configurable predicate. The
//! default never terminates, leaving `max_rounds` and reply budgets as the only
//! stop conditions.

use super::turn::Turn;
use serde::{Deserialize, Serialize};

/// Decides whether a freshly appended turn ends the conversation
pub trait TerminationPredicate: Send + Sync {
    fn is_terminal(&self, turn: &Turn) -> bool;

    /// Short human-readable description, used in logs
    fn describe(&self) -> String {
        "custom predicate".to_string()
    }
}

impl<F> TerminationPredicate for F
where
    F: Fn(&Turn) -> bool + Send + Sync,
{
    fn is_terminal(&self, turn: &Turn) -> bool {
        self(turn)
    }
}

/// Never terminates
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl TerminationPredicate for NeverTerminate {
    fn is_terminal(&self, _turn: &Turn) -> bool {
        false
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}

/// Where the marker has to appear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    /// Anywhere in the content
    #[default]
    Anywhere,
    /// At the end of the content, ignoring trailing whitespace
    End,
}

/// Terminates when a message contains a marker phrase
///
/// Execution results never terminate: program output echoing the marker is
/// not a participant's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerTermination {
    pub marker: String,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub position: MarkerPosition,
}

fn default_case_sensitive() -> bool {
    true
}

impl MarkerTermination {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            case_sensitive: true,
            position: MarkerPosition::Anywhere,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn at_end(mut self) -> Self {
        self.position = MarkerPosition::End;
        self
    }

    fn matches(&self, content: &str) -> bool {
        if self.marker.is_empty() {
            return false;
        }
        let (content, marker) = if self.case_sensitive {
            (content.to_string(), self.marker.clone())
        } else {
            (content.to_lowercase(), self.marker.to_lowercase())
        };
        match self.position {
            MarkerPosition::Anywhere => content.contains(&marker),
            MarkerPosition::End => content.trim_end().ends_with(&marker),
        }
    }
}

impl TerminationPredicate for MarkerTermination {
    fn is_terminal(&self, turn: &Turn) -> bool {
        turn.is_message() && self.matches(turn.content())
    }

    fn describe(&self) -> String {
        format!(
            "marker {:?} ({}, {})",
            self.marker,
            if self.case_sensitive {
                "case-sensitive"
            } else {
                "case-insensitive"
            },
            match self.position {
                MarkerPosition::Anywhere => "anywhere",
                MarkerPosition::End => "at end",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::transcript::Transcript;
    use crate::conversation::turn::TurnKind;

    fn turn(content: &str, kind: TurnKind) -> Turn {
        let mut t = Transcript::new();
        t.append("A", content, kind).clone()
    }

    #[test]
    fn test_never_terminate() {
        assert!(!NeverTerminate.is_terminal(&turn("TERMINATE", TurnKind::Message)));
    }

    #[test]
    fn test_marker_case_sensitive_by_default() {
        let p = MarkerTermination::new("TERMINATE");
        assert!(p.is_terminal(&turn("All good.\nTERMINATE", TurnKind::Message)));
        assert!(!p.is_terminal(&turn("terminate", TurnKind::Message)));
    }

    #[test]
    fn test_marker_case_insensitive() {
        let p = MarkerTermination::new("TERMINATE").case_insensitive();
        assert!(p.is_terminal(&turn("we can terminate now", TurnKind::Message)));
    }

    #[test]
    fn test_marker_at_end() {
        let p = MarkerTermination::new("TERMINATE").at_end();
        assert!(p.is_terminal(&turn("Done. TERMINATE  \n", TurnKind::Message)));
        assert!(!p.is_terminal(&turn("TERMINATE? not yet", TurnKind::Message)));
    }

    #[test]
    fn test_execution_results_never_terminate() {
        let p = MarkerTermination::new("TERMINATE");
        assert!(!p.is_terminal(&turn("TERMINATE", TurnKind::ExecutionResult)));
    }

    #[test]
    fn test_empty_marker_never_matches() {
        let p = MarkerTermination::new("");
        assert!(!p.is_terminal(&turn("anything", TurnKind::Message)));
    }

    #[test]
    fn test_closure_predicate() {
        let p = |t: &Turn| t.content().len() > 5;
        assert!(p.is_terminal(&turn("longer text", TurnKind::Message)));
        assert!(!TerminationPredicate::is_terminal(&p, &turn("hi", TurnKind::Message)));
    }
}

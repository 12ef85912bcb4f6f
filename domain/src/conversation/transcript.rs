//! Append-only conversation transcript

use super::turn::{Turn, TurnKind};
use serde::{Deserialize, Serialize};

/// Ordered log of turns shared by all participants (Entity)
///
/// The only mutation is [`append`](Self::append), which assigns the next
/// sequence number. Sequence numbers are therefore always `0..len` with no
/// gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return it
    pub fn append(
        &mut self,
        speaker: impl Into<String>,
        content: impl Into<String>,
        kind: TurnKind,
    ) -> &Turn {
        let turn = Turn::new(self.turns.len(), speaker, content, kind);
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of message turns; execution results are not counted
    pub fn message_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_message()).count()
    }

    /// How many of the most recent message turns, counted back from the end
    /// without interruption, were spoken by `name`
    pub fn trailing_streak(&self, name: &str) -> usize {
        self.turns
            .iter()
            .rev()
            .filter(|t| t.is_message())
            .take_while(|t| t.speaker() == name)
            .count()
    }

    /// The seed turn's content
    pub fn task(&self) -> Option<&str> {
        self.turns.first().map(|t| t.content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut t = Transcript::new();
        t.append("Coordinator", "write function F", TurnKind::Message);
        t.append("Generator", "```python\nprint(1)\n```", TurnKind::Message);
        t.append("Coordinator", "exitcode: 0", TurnKind::ExecutionResult);
        t
    }

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let t = sample();
        let seqs: Vec<usize> = t.turns().iter().map(|t| t.sequence()).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn test_append_returns_new_turn() {
        let mut t = Transcript::new();
        let turn = t.append("A", "hi", TurnKind::Message);
        assert_eq!(turn.sequence(), 0);
        assert_eq!(turn.speaker(), "A");
        assert_eq!(turn.kind(), TurnKind::Message);
    }

    #[test]
    fn test_message_count_skips_execution_results() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.message_count(), 2);
    }

    #[test]
    fn test_trailing_streak() {
        let mut t = Transcript::new();
        t.append("A", "1", TurnKind::Message);
        t.append("B", "2", TurnKind::Message);
        t.append("B", "3", TurnKind::Message);
        t.append("B", "out", TurnKind::ExecutionResult);
        t.append("B", "4", TurnKind::Message);
        assert_eq!(t.trailing_streak("B"), 3);
        assert_eq!(t.trailing_streak("A"), 0);
    }

    #[test]
    fn test_task_is_seed_content() {
        let t = sample();
        assert_eq!(t.task(), Some("write function F"));
        assert!(Transcript::new().task().is_none());
    }

    #[test]
    fn test_serializes_turns() {
        let t = sample();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["turns"][2]["kind"], "execution_result");
        assert_eq!(json["turns"][0]["sequence"], 0);
    }
}

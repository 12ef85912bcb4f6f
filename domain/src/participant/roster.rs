//! Roster of conversation participants

use super::entities::Participant;
use super::role::Role;
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Ordered, validated set of participants
///
/// Fixed for the lifetime of one conversation. The order is the round-robin
/// order and `roster[0]` seeds the task.
///
/// Invariants: at least two participants, names unique and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub const MIN_PARTICIPANTS: usize = 2;

    pub fn new(participants: Vec<Participant>) -> Result<Self, DomainError> {
        if participants.len() < Self::MIN_PARTICIPANTS {
            return Err(DomainError::TooFewParticipants {
                found: participants.len(),
            });
        }

        let mut seen = HashSet::new();
        for participant in &participants {
            if participant.name().trim().is_empty() {
                return Err(DomainError::EmptyParticipantName);
            }
            if !seen.insert(participant.name()) {
                return Err(DomainError::DuplicateParticipant(
                    participant.name().to_string(),
                ));
            }
        }

        Ok(Self { participants })
    }

    /// Coordinator, generator, reviewer, tester with their default settings
    pub fn default_participants() -> Vec<Participant> {
        Role::ALL.iter().map(|r| Participant::for_role(*r)).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false for a validated roster; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// Participant at `index` modulo the roster size
    pub fn at(&self, index: usize) -> &Participant {
        &self.participants[index % self.participants.len()]
    }

    /// The participant that seeds the task
    pub fn seed(&self) -> &Participant {
        &self.participants[0]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name() == name)
    }

    pub fn find(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_order() {
        let roster = Roster::new(Roster::default_participants()).unwrap();
        assert_eq!(
            roster.names(),
            vec!["UserProxyAgent", "CodeAssistant", "CriticAgent", "TestAgent"]
        );
        assert_eq!(roster.seed().role(), Role::Coordinator);
    }

    #[test]
    fn test_rejects_single_participant() {
        let err = Roster::new(vec![Participant::for_role(Role::Generator)]).unwrap_err();
        assert_eq!(err, DomainError::TooFewParticipants { found: 1 });
    }

    #[test]
    fn test_rejects_empty_roster() {
        let err = Roster::new(vec![]).unwrap_err();
        assert_eq!(err, DomainError::TooFewParticipants { found: 0 });
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Roster::new(vec![
            Participant::new("Alice", Role::Generator),
            Participant::new("Alice", Role::Reviewer),
        ])
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant("Alice".to_string()));
    }

    #[test]
    fn test_rejects_blank_name() {
        let err = Roster::new(vec![
            Participant::new("  ", Role::Generator),
            Participant::new("Bob", Role::Reviewer),
        ])
        .unwrap_err();
        assert_eq!(err, DomainError::EmptyParticipantName);
    }

    #[test]
    fn test_at_wraps() {
        let roster = Roster::new(Roster::default_participants()).unwrap();
        assert_eq!(roster.at(5).name(), "CodeAssistant");
        assert_eq!(roster.position("TestAgent"), Some(3));
        assert!(roster.find("Nobody").is_none());
    }
}

//! Task value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The work item a conversation is asked to complete (Value Object)
///
/// The task description seeds the transcript as the first turn, attributed to
/// the first participant of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
}

impl Task {
    /// Create a task, rejecting empty or whitespace-only descriptions
    pub fn new(description: impl Into<String>) -> Result<Self, DomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::EmptyTask);
        }
        Ok(Self { description })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_description(self) -> String {
        self.description
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl TryFrom<&str> for Task {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Task::new(s)
    }
}

impl TryFrom<String> for Task {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Task::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("write function F").unwrap();
        assert_eq!(task.description(), "write function F");
    }

    #[test]
    fn test_empty_task_rejected() {
        assert_eq!(Task::new(""), Err(DomainError::EmptyTask));
        assert_eq!(Task::new("  \n\t"), Err(DomainError::EmptyTask));
    }

    #[test]
    fn test_try_from_str() {
        let task: Task = "Build a BankAccount class".try_into().unwrap();
        assert_eq!(task.to_string(), "Build a BankAccount class");
    }
}

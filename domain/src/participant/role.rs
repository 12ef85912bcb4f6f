//! Participant roles

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The role a participant plays in the conversation (Value Object)
///
/// The set of roles is closed. Each role carries a default name, a default
/// directive and a default execution capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Presents the task, executes code, decides when the work is done
    Coordinator,
    /// Writes the implementation
    Generator,
    /// Critiques the implementation
    Reviewer,
    /// Writes tests for the implementation
    Tester,
}

impl Role {
    /// Default roster order: the coordinator seeds the task
    pub const ALL: [Role; 4] = [
        Role::Coordinator,
        Role::Generator,
        Role::Reviewer,
        Role::Tester,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Generator => "generator",
            Role::Reviewer => "reviewer",
            Role::Tester => "tester",
        }
    }

    /// Participant name used when none is configured
    pub fn default_name(&self) -> &'static str {
        match self {
            Role::Coordinator => "UserProxyAgent",
            Role::Generator => "CodeAssistant",
            Role::Reviewer => "CriticAgent",
            Role::Tester => "TestAgent",
        }
    }

    /// Only the coordinator runs code by default
    pub fn can_execute_by_default(&self) -> bool {
        matches!(self, Role::Coordinator)
    }

    /// Consecutive auto-reply budget used when none is configured
    pub fn default_max_auto_replies(&self) -> Option<usize> {
        match self {
            Role::Coordinator => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coordinator" | "user_proxy" | "userproxy" => Ok(Role::Coordinator),
            "generator" | "assistant" | "coder" => Ok(Role::Generator),
            "reviewer" | "critic" => Ok(Role::Reviewer),
            "tester" | "test" => Ok(Role::Tester),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

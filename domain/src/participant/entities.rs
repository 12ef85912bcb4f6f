//! Participant entity

use super::role::Role;
use crate::prompt::Directive;
use serde::{Deserialize, Serialize};

/// A named role with a behavioural directive (Entity)
///
/// Built with a consuming builder and immutable afterwards. Participants are
/// owned by a [`Roster`](super::roster::Roster) for the lifetime of one
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    role: Role,
    directive: String,
    can_execute: bool,
    /// `None` means unbounded
    max_auto_replies: Option<usize>,
}

impl Participant {
    /// Create a participant with the role's default directive and capabilities
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            directive: Directive::for_role(role).to_string(),
            can_execute: role.can_execute_by_default(),
            max_auto_replies: role.default_max_auto_replies(),
        }
    }

    /// Create a participant with the role's default name
    pub fn for_role(role: Role) -> Self {
        Self::new(role.default_name(), role)
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    pub fn with_execution(mut self, can_execute: bool) -> Self {
        self.can_execute = can_execute;
        self
    }

    pub fn with_max_auto_replies(mut self, max: Option<usize>) -> Self {
        self.max_auto_replies = max;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn can_execute(&self) -> bool {
        self.can_execute
    }

    pub fn max_auto_replies(&self) -> Option<usize> {
        self.max_auto_replies
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

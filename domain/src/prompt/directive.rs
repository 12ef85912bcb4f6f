//! Default behavioural directives for each participant role

use crate::participant::role::Role;

/// Built-in system prompts, one per role
pub struct Directive;

impl Directive {
    /// Default directive for a role
    pub fn for_role(role: Role) -> &'static str {
        match role {
            Role::Coordinator => Self::coordinator(),
            Role::Generator => Self::generator(),
            Role::Reviewer => Self::reviewer(),
            Role::Tester => Self::tester(),
        }
    }

    pub fn generator() -> &'static str {
        r#"You are CodeAssistant, the code generator of a small engineering team.
Write clean, efficient and documented Python that solves the task at hand.
Use type hints, docstrings and explicit error handling. Keep functions small
and reusable. Put the complete program in a single ```python fenced block so
that it can be executed as-is, and briefly explain the design you chose.
When the reviewer or the tests report problems, reply with a corrected,
complete version of the code."#
    }

    pub fn reviewer() -> &'static str {
        r#"You are CriticAgent, the code reviewer of a small engineering team.
Review the latest code for bugs, unhandled edge cases, security issues,
performance problems, readability and documentation quality. Give specific,
actionable feedback with short examples. When execution output shows a
failure, explain the likely cause. Do not rewrite the whole program yourself."#
    }

    pub fn tester() -> &'static str {
        r##"You are TestAgent, the test writer of a small engineering team.
Write pytest unit tests for the latest version of the code: normal behaviour,
edge cases, boundary conditions and error handling. Use fixtures where they
help. Put the tests in a single ```python fenced block that includes the code
under test or imports it by the file name given with a "# filename:" line."##
    }

    pub fn coordinator() -> &'static str {
        r#"You are UserProxyAgent, the workflow coordinator of a small engineering team.
Present the requirements, keep the generator, reviewer and tester focused on
them, and decide when the deliverable is good enough. Code you post in a
fenced block is executed and its output is shared with the team. When the
implementation meets every requirement and its tests pass, reply with
TERMINATE on its own line."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_directive() {
        for role in Role::ALL {
            assert!(!Directive::for_role(role).trim().is_empty());
        }
    }

    #[test]
    fn test_directives_name_their_role() {
        assert!(Directive::generator().contains("CodeAssistant"));
        assert!(Directive::reviewer().contains("CriticAgent"));
        assert!(Directive::tester().contains("TestAgent"));
        assert!(Directive::coordinator().contains("UserProxyAgent"));
    }

    #[test]
    fn test_tester_mentions_filename_hint() {
        let directive = Directive::tester();
        assert!(directive.contains("\"# filename:\" line."));
        assert!(directive.ends_with("line."));
    }
}

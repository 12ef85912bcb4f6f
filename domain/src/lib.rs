//! Domain layer for codecrew
//!
//! This crate contains the turn-taking protocol: participants, the roster,
//! the append-only transcript and the rules deciding who speaks next and when
//! a conversation is over. It has no I/O and no async code.
//!
//! # Core Concepts
//!
//! - **Participant**: a named role (coordinator, generator, reviewer, tester)
//!   with a directive, an execution capability and a reply budget
//! - **Transcript**: the shared, append-only log of turns
//! - **Speaker selection**: a pure function of transcript and roster
//! - **Termination**: round budget, reply budgets, or a configurable predicate

pub mod config;
pub mod conversation;
pub mod core;
pub mod participant;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::OutputFormat;
pub use conversation::{
    artifact::{ArtifactLanguage, CodeArtifact, extract_artifacts},
    budget::{is_exhausted, resolve_speaker},
    config::ConversationConfig,
    execution::{EXIT_CODE_UNAVAILABLE, ExecutionReport, render_reports},
    run::{CompletionReason, ConversationRun, ConversationState},
    selection::{RandomSelection, RoundRobin, SpeakerSelection, SpeakerSelectionPolicy},
    termination::{MarkerPosition, MarkerTermination, NeverTerminate, TerminationPredicate},
    transcript::Transcript,
    turn::{Turn, TurnKind},
};
pub use core::{error::DomainError, model::ModelSettings, string::preview, task::Task};
pub use participant::{entities::Participant, role::Role, roster::Roster};
pub use prompt::Directive;
pub use session::entities::{Message, MessageRole};

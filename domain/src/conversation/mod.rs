//! The turn-taking protocol.
//!
//! - [`transcript::Transcript`]: append-only log of [`turn::Turn`]s
//! - [`selection`]: who speaks next (round-robin, seeded random)
//! - [`budget`]: consecutive auto-reply limits
//! - [`termination`]: configurable stop predicates
//! - [`artifact`] / [`execution`]: code found in turns and the result of running it
//! - [`run::ConversationRun`]: `Init → Running → {Completed, Aborted}`

pub mod artifact;
pub mod budget;
pub mod config;
pub mod execution;
pub mod run;
pub mod selection;
pub mod termination;
pub mod transcript;
pub mod turn;

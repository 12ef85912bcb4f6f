//! Core domain concepts shared across all subdomains.
//!
//! - [`task::Task`]: a validated task description that seeds a conversation
//! - [`model::ModelSettings`]: immutable language-model settings
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
pub mod task;

//! Prompt text for participants.

pub mod directive;

pub use directive::Directive;

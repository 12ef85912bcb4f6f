//! Language-model chat messages.
//!
//! - [`entities::Message`]: a single message in a chat completion request

pub mod entities;

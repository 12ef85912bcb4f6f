//! Language-model adapters
//!
//! - [`OpenAiGateway`]: OpenAI-compatible `/chat/completions` over reqwest
//! - [`RetryingGateway`]: backoff wrapper for transient failures

mod openai;
mod retry;

pub use openai::OpenAiGateway;
pub use retry::{RetryConfig, RetryingGateway};

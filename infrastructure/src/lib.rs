//! Infrastructure layer for codecrew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod environment;
pub mod executor;
pub mod llm;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConversationConfig, FileExecutionConfig,
    FileLlmConfig, FileOutputConfig, FileOutputFormat, FileParticipantConfig,
};
pub use environment::SystemProbe;
pub use executor::LocalCodeExecutor;
pub use llm::{OpenAiGateway, RetryConfig, RetryingGateway};
pub use logging::JsonlConversationLogger;

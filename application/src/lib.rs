//! Application layer for codecrew
//!
//! This crate contains use cases, port definitions, the conversation agents
//! and application configuration. It depends only on the domain layer.

pub mod agent;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agent::{ConversationAgent, LlmAgent, ScriptedAgent};
pub use config::{BehaviorConfig, ExecutionParams};
pub use ports::{
    capability::{Capability, CapabilityProbe, CapabilityStatus},
    code_executor::CodeExecutorPort,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{ConversationProgress, NoProgress},
};
pub use use_cases::check_environment::{CheckEnvironmentUseCase, DemoPath, EnvironmentReport};
pub use use_cases::execute_turn::{ExecutedTurn, TurnExecutor};
pub use use_cases::offline_demo::{OfflineDemo, SampleExecutor};
pub use use_cases::run_conversation::{
    ConversationOutcome, RunConversationError, RunConversationInput, RunConversationUseCase,
};
pub use use_cases::run_test_suite::{RunTestSuiteError, RunTestSuiteUseCase};

//! Application-level configuration.
//!
//! - [`BehaviorConfig`]: timeout applied to each participant's `produce` call
//! - [`ExecutionParams`]: where and how code artifacts and test suites run

pub mod behavior;
pub mod execution_params;

pub use behavior::BehaviorConfig;
pub use execution_params::ExecutionParams;

//! Run Test Suite use case
//!
//! Runs the configured test command inside the execution working directory.
//! Failing tests are a result, not an error.

use crate::ports::code_executor::CodeExecutorPort;
use crew_domain::ExecutionReport;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunTestSuiteError {
    #[error("No test command configured")]
    EmptyCommand,
}

/// Use case for running the test suite
pub struct RunTestSuiteUseCase<E: CodeExecutorPort> {
    executor: Arc<E>,
}

impl<E: CodeExecutorPort> RunTestSuiteUseCase<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Run `command` (program followed by its arguments)
    pub async fn execute(&self, command: &[String]) -> Result<ExecutionReport, RunTestSuiteError> {
        let (program, args) = command
            .split_first()
            .ok_or(RunTestSuiteError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(RunTestSuiteError::EmptyCommand);
        }

        info!(
            "Running `{}` in {}",
            command.join(" "),
            self.executor.work_dir().display()
        );
        let report = self.executor.run_command(program, args).await;
        info!("Test command exited with {}", report.exit_code);
        Ok(report)
    }
}

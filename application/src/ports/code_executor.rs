//! Code Executor port
//!
//! Defines how code artifacts and test commands are run. Implementations never
//! fail: a process that cannot start, exits non-zero or times out is described
//! by the returned [`ExecutionReport`].

use async_trait::async_trait;
use crew_domain::{CodeArtifact, ExecutionReport};
use std::path::Path;

/// Port for running code on behalf of the conversation
#[async_trait]
pub trait CodeExecutorPort: Send + Sync {
    /// Directory artifacts are written to and run in
    fn work_dir(&self) -> &Path;

    /// Write the artifact into the working directory and run it
    async fn execute(&self, artifact: &CodeArtifact) -> ExecutionReport;

    /// Run an arbitrary program inside the working directory
    async fn run_command(&self, program: &str, args: &[String]) -> ExecutionReport;
}

//! Execution parameters for code artifacts and test suites.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where and how code posted by capability-flagged participants runs.
///
/// The working directory is dedicated to one conversation at a time; files
/// written there persist after the run for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Directory artifacts are written to and executed in.
    pub work_dir: PathBuf,
    /// Wall-clock limit for one artifact or test command.
    pub timeout: Duration,
    /// Interpreter for Python artifacts.
    pub python: String,
    /// Interpreter for shell artifacts.
    pub shell: String,
    /// Program and arguments used by the test-suite action.
    pub test_command: Vec<String>,
    /// Captured output beyond this many bytes is cut.
    pub max_output_bytes: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("codecrew_workspace"),
            timeout: Duration::from_secs(60),
            python: "python3".to_string(),
            shell: "sh".to_string(),
            test_command: vec![
                "python3".to_string(),
                "-m".to_string(),
                "pytest".to_string(),
                "-v".to_string(),
            ],
            max_output_bytes: 64 * 1024,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_test_command(mut self, command: Vec<String>) -> Self {
        self.test_command = command;
        self
    }
}

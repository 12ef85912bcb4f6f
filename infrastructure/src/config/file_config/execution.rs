//! Code execution configuration from TOML (`[execution]` section)

use super::ConfigValidationError;
use crew_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Directory artifacts are written to and run in; created on demand
    pub work_dir: PathBuf,
    pub timeout_seconds: u64,
    /// Interpreter for Python artifacts
    pub python: String,
    /// Interpreter for shell artifacts
    pub shell: String,
    /// Program and arguments of the test-suite action
    pub test_command: Vec<String>,
    pub max_output_bytes: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            work_dir: params.work_dir,
            timeout_seconds: params.timeout.as_secs(),
            python: params.python,
            shell: params.shell,
            test_command: params.test_command,
            max_output_bytes: params.max_output_bytes,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_execution_params(&self) -> Result<ExecutionParams, ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                section: "execution",
            });
        }
        if self.test_command.iter().all(|part| part.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyTestCommand);
        }
        Ok(ExecutionParams {
            work_dir: self.work_dir.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            python: self.python.clone(),
            shell: self.shell.clone(),
            test_command: self.test_command.clone(),
            max_output_bytes: self.max_output_bytes,
        })
    }
}

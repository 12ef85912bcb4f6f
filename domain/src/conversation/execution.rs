//! Result of running code artifacts

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Exit code reported when the process could not be started or was killed
pub const EXIT_CODE_UNAVAILABLE: i32 = -1;

/// Outcome of executing one artifact or command (Value Object)
///
/// A non-zero exit is an ordinary outcome. It is rendered into the transcript
/// so later participants can react to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    /// File the artifact was written to, if any
    pub artifact_path: Option<PathBuf>,
}

impl ExecutionReport {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            timed_out: false,
            artifact_path: None,
        }
    }

    /// The process never ran (spawn failure, missing interpreter, I/O error)
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(EXIT_CODE_UNAVAILABLE, "", reason)
    }

    pub fn timed_out(after_secs: u64) -> Self {
        Self {
            timed_out: true,
            ..Self::new(
                EXIT_CODE_UNAVAILABLE,
                "",
                format!("Execution timed out after {} seconds", after_secs),
            )
        }
    }

    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// Combined stdout and stderr
    pub fn output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Render one or more reports as the content of an execution-result turn
pub fn render_reports(reports: &[ExecutionReport]) -> String {
    let exit_code = reports.last().map(|r| r.exit_code).unwrap_or(0);
    let succeeded = reports.iter().all(ExecutionReport::succeeded);

    let mut content = format!(
        "exitcode: {} ({})\n",
        exit_code,
        if succeeded {
            "execution succeeded"
        } else {
            "execution failed"
        }
    );

    for (i, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            content.push_str(&format!("--- artifact {} ---\n", i + 1));
        }
        if let Some(path) = &report.artifact_path {
            content.push_str(&format!("File: {}\n", path.display()));
        }
        let output = report.output();
        if output.trim().is_empty() {
            content.push_str("Code output: (none)\n");
        } else {
            content.push_str(&format!("Code output:\n{}\n", output.trim_end()));
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rendering() {
        let report = ExecutionReport::new(0, "hello\n", "");
        let content = render_reports(&[report]);
        assert!(content.starts_with("exitcode: 0 (execution succeeded)"));
        assert!(content.contains("Code output:\nhello"));
    }

    #[test]
    fn test_failure_rendering_includes_stderr() {
        let report = ExecutionReport::new(1, "", "Traceback: boom");
        let content = render_reports(&[report]);
        assert!(content.starts_with("exitcode: 1 (execution failed)"));
        assert!(content.contains("Traceback: boom"));
    }

    #[test]
    fn test_timed_out_is_not_success() {
        let report = ExecutionReport::timed_out(5);
        assert!(!report.succeeded());
        assert!(report.stderr.contains("5 seconds"));
    }

    #[test]
    fn test_multiple_reports_are_numbered() {
        let content = render_reports(&[
            ExecutionReport::new(0, "a", "").with_artifact_path("/tmp/w/a.py"),
            ExecutionReport::new(2, "", "bad"),
        ]);
        assert!(content.starts_with("exitcode: 2 (execution failed)"));
        assert!(content.contains("--- artifact 1 ---"));
        assert!(content.contains("File: /tmp/w/a.py"));
        assert!(content.contains("--- artifact 2 ---"));
    }

    #[test]
    fn test_output_joins_streams() {
        let report = ExecutionReport::new(0, "out", "err");
        assert_eq!(report.output(), "out\nerr");
    }
}

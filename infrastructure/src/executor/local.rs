//! Runs code artifacts and commands as local child processes

use async_trait::async_trait;
use crew_application::{CodeExecutorPort, ExecutionParams};
use crew_domain::{ArtifactLanguage, CodeArtifact, ExecutionReport};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Executes artifacts inside a dedicated working directory
///
/// Each artifact is written to a file (its `# filename:` hint, or
/// `code_<hash>.<ext>`) and run with the configured interpreter. Files with the
/// same name are overwritten. Every outcome, including a failure to start the
/// process, is returned as an [`ExecutionReport`].
pub struct LocalCodeExecutor {
    params: ExecutionParams,
}

impl LocalCodeExecutor {
    pub fn new(params: ExecutionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// File name used for an artifact
    pub fn file_name_for(artifact: &CodeArtifact) -> String {
        if let Some(name) = artifact.file_name() {
            return name.to_string();
        }
        let mut hasher = DefaultHasher::new();
        artifact.source().hash(&mut hasher);
        format!(
            "code_{:016x}.{}",
            hasher.finish(),
            artifact.language().extension()
        )
    }

    fn interpreter(&self, language: ArtifactLanguage) -> &str {
        match language {
            ArtifactLanguage::Python => &self.params.python,
            ArtifactLanguage::Shell => &self.params.shell,
        }
    }

    async fn write_artifact(&self, artifact: &CodeArtifact) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.params.work_dir).await?;
        let path = self.params.work_dir.join(Self::file_name_for(artifact));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, artifact.source()).await?;
        Ok(path)
    }

    async fn run(&self, program: &str, args: &[String]) -> ExecutionReport {
        if let Err(e) = tokio::fs::create_dir_all(&self.params.work_dir).await {
            return ExecutionReport::unavailable(format!(
                "Could not create working directory {}: {}",
                self.params.work_dir.display(),
                e
            ));
        }

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.params.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn {}: {}", program, e);
                return ExecutionReport::unavailable(format!("Failed to spawn {}: {}", program, e));
            }
        };

        // Dropping the child on timeout kills it.
        match tokio::time::timeout(self.params.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let exit_code = output.status.code().unwrap_or(-1);
                debug!("{} exited with {}", program, exit_code);
                ExecutionReport::new(
                    exit_code,
                    truncate(&String::from_utf8_lossy(&output.stdout), self.params.max_output_bytes),
                    truncate(&String::from_utf8_lossy(&output.stderr), self.params.max_output_bytes),
                )
            }
            Ok(Err(e)) => ExecutionReport::unavailable(format!("Failed to wait for {}: {}", program, e)),
            Err(_) => {
                warn!(
                    "{} timed out after {} seconds",
                    program,
                    self.params.timeout.as_secs()
                );
                ExecutionReport::timed_out(self.params.timeout.as_secs())
            }
        }
    }
}

/// Cut `text` to at most `max` bytes on a character boundary
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n... (output truncated)", &text[..end])
}

#[async_trait]
impl CodeExecutorPort for LocalCodeExecutor {
    fn work_dir(&self) -> &Path {
        &self.params.work_dir
    }

    async fn execute(&self, artifact: &CodeArtifact) -> ExecutionReport {
        let path = match self.write_artifact(artifact).await {
            Ok(path) => path,
            Err(e) => {
                return ExecutionReport::unavailable(format!("Could not write artifact: {}", e));
            }
        };
        let file_name = Self::file_name_for(artifact);
        debug!(
            "Running {} with {}",
            path.display(),
            self.interpreter(artifact.language())
        );
        self.run(self.interpreter(artifact.language()), &[file_name])
            .await
            .with_artifact_path(path)
    }

    async fn run_command(&self, program: &str, args: &[String]) -> ExecutionReport {
        self.run(program, args).await
    }
}

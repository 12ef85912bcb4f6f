//! Execute Turn use case
//!
//! One participant's turn: produce content, append it, and run any code
//! artifacts if the participant is allowed to.

use crate::agent::ConversationAgent;
use crate::config::BehaviorConfig;
use crate::ports::code_executor::CodeExecutorPort;
use crate::ports::llm_gateway::GatewayError;
use crew_domain::{ExecutionReport, Transcript, Turn, TurnKind, extract_artifacts, render_reports};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns appended by one execution
#[derive(Debug, Clone)]
pub struct ExecutedTurn {
    pub message: Turn,
    /// Present when the speaker can execute and posted runnable artifacts
    pub execution: Option<Turn>,
}

impl ExecutedTurn {
    /// Appended turns in transcript order
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        std::iter::once(&self.message).chain(self.execution.as_ref())
    }
}

/// Runs a single participant turn against the transcript
pub struct TurnExecutor<E: CodeExecutorPort> {
    executor: Arc<E>,
    behavior: BehaviorConfig,
}

impl<E: CodeExecutorPort> TurnExecutor<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Produce and append the agent's turn
    ///
    /// Only `produce` can fail. On failure the transcript is left untouched.
    pub async fn execute<A: ConversationAgent + ?Sized>(
        &self,
        agent: &A,
        transcript: &mut Transcript,
    ) -> Result<ExecutedTurn, GatewayError> {
        let content = self.produce(agent, transcript).await?;
        let message = transcript
            .append(agent.name(), content, TurnKind::Message)
            .clone();

        let execution = if agent.can_execute() {
            self.run_artifacts(agent.name(), &message, transcript).await
        } else {
            None
        };

        Ok(ExecutedTurn { message, execution })
    }

    async fn produce<A: ConversationAgent + ?Sized>(
        &self,
        agent: &A,
        transcript: &Transcript,
    ) -> Result<String, GatewayError> {
        match self.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, agent.produce(transcript))
                .await
                .map_err(|_| {
                    warn!("{} did not reply within {:?}", agent.name(), limit);
                    GatewayError::Timeout
                })?,
            None => agent.produce(transcript).await,
        }
    }

    async fn run_artifacts(
        &self,
        speaker: &str,
        message: &Turn,
        transcript: &mut Transcript,
    ) -> Option<Turn> {
        let artifacts = extract_artifacts(message.content());
        if artifacts.is_empty() {
            return None;
        }

        info!("{} posted {} code block(s), executing", speaker, artifacts.len());
        let mut reports: Vec<ExecutionReport> = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let report = self.executor.execute(artifact).await;
            debug!(
                "{} artifact finished with exit code {}",
                artifact.language().as_str(),
                report.exit_code
            );
            let failed = !report.succeeded();
            reports.push(report);
            if failed {
                break;
            }
        }

        let content = render_reports(&reports);
        Some(
            transcript
                .append(speaker, content, TurnKind::ExecutionResult)
                .clone(),
        )
    }
}

//! Run Conversation use case
//!
//! Drives the `Init → Running → {Completed, Aborted}` loop: seed the
//! transcript, pick a speaker, execute its turn, check the stop conditions.

use super::execute_turn::TurnExecutor;
use crate::agent::ConversationAgent;
use crate::config::BehaviorConfig;
use crate::ports::code_executor::CodeExecutorPort;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::{ConversationProgress, NoProgress};
use crew_domain::{
    CompletionReason, ConversationConfig, ConversationRun, ConversationState, DomainError, Roster,
    SpeakerSelectionPolicy, Task, Transcript, Turn, TurnKind, resolve_speaker,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised before the first turn
///
/// Failures during the run are not errors of the use case: they end up in
/// [`ConversationOutcome::error`] next to the partial transcript.
#[derive(Error, Debug)]
pub enum RunConversationError {
    #[error("Invalid conversation configuration: {0}")]
    Configuration(#[from] DomainError),
}

/// Input for the RunConversation use case
pub struct RunConversationInput<A: ConversationAgent> {
    pub task: Task,
    /// Agents in roster order; the first one seeds the transcript
    pub agents: Vec<A>,
    pub config: ConversationConfig,
}

impl<A: ConversationAgent> RunConversationInput<A> {
    pub fn new(task: Task, agents: Vec<A>, config: ConversationConfig) -> Self {
        Self {
            task,
            agents,
            config,
        }
    }
}

/// Final transcript and status of a conversation
#[derive(Debug)]
pub struct ConversationOutcome {
    pub transcript: Transcript,
    pub state: ConversationState,
    pub reason: Option<CompletionReason>,
    /// Rounds played, the seed included
    pub rounds: usize,
    /// The error that aborted the run
    pub error: Option<GatewayError>,
    /// Participant names in roster order
    pub participants: Vec<String>,
}

impl ConversationOutcome {
    pub fn is_completed(&self) -> bool {
        self.state == ConversationState::Completed
    }

    pub fn is_aborted(&self) -> bool {
        self.state == ConversationState::Aborted
    }

    /// Speakers of message turns in order
    pub fn speakers(&self) -> Vec<&str> {
        self.transcript
            .turns()
            .iter()
            .filter(|t| t.is_message())
            .map(|t| t.speaker())
            .collect()
    }
}

/// Use case for running a multi-agent conversation
pub struct RunConversationUseCase<E: CodeExecutorPort> {
    turns: TurnExecutor<E>,
    logger: Arc<dyn ConversationLogger>,
}

impl<E: CodeExecutorPort> RunConversationUseCase<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            turns: TurnExecutor::new(executor),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.turns = self.turns.with_behavior(behavior);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute<A: ConversationAgent>(
        &self,
        input: RunConversationInput<A>,
    ) -> Result<ConversationOutcome, RunConversationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress<A: ConversationAgent>(
        &self,
        input: RunConversationInput<A>,
        progress: &dyn ConversationProgress,
    ) -> Result<ConversationOutcome, RunConversationError> {
        let RunConversationInput {
            task,
            agents,
            config,
        } = input;

        config.validate()?;
        let roster = Roster::new(agents.iter().map(|a| a.participant().clone()).collect())?;

        info!(
            "Starting conversation with {} participants (max {} rounds, {} selection)",
            roster.len(),
            config.max_rounds,
            config.speaker_selection
        );

        let mut transcript = Transcript::new();
        let mut run = ConversationRun::new();

        let seed = transcript
            .append(roster.seed().name(), task.description(), TurnKind::Message)
            .clone();
        run.start();

        self.logger.log(ConversationEvent::new(
            "conversation_started",
            json!({
                "task": task.description(),
                "participants": roster.names(),
                "max_rounds": config.max_rounds,
                "selection": config.speaker_selection.as_str(),
                "termination": config.termination.describe(),
            }),
        ));
        progress.on_conversation_start(task.description(), &roster);
        self.record_turn(&seed, progress);

        let mut error = None;
        while run.is_running() {
            if run.rounds() >= config.max_rounds {
                run.complete(CompletionReason::MaxRounds);
                break;
            }

            let selected = config.speaker_selection.select_index(&transcript, &roster);
            let Some(index) = resolve_speaker(selected, &roster, &transcript) else {
                info!("No participant has reply budget left");
                run.complete(CompletionReason::RepliesExhausted);
                break;
            };
            if index != selected {
                let (skipped, chosen) = (roster.at(selected), roster.at(index));
                debug!("{} exhausted its reply budget, {} speaks", skipped, chosen);
                self.logger.log(ConversationEvent::new(
                    "speaker_skipped",
                    json!({ "skipped": skipped.name(), "chosen": chosen.name() }),
                ));
                progress.on_speaker_skipped(skipped, chosen);
            }

            let agent = &agents[index];
            progress.on_turn_start(run.rounds() + 1, agent.participant());

            match self.turns.execute(agent, &mut transcript).await {
                Ok(executed) => {
                    run.record_round();
                    let mut terminal = false;
                    for turn in executed.turns() {
                        self.record_turn(turn, progress);
                        terminal |= config.termination.is_terminal(turn);
                    }
                    if terminal {
                        info!("{} ended the conversation", agent.name());
                        run.complete(CompletionReason::TerminationMarker);
                    }
                }
                Err(e) => {
                    warn!("{} failed: {}", agent.name(), e);
                    run.abort();
                    error = Some(e);
                }
            }
        }

        info!(
            "Conversation {} after {} rounds ({} turns)",
            run.state(),
            run.rounds(),
            transcript.len()
        );
        self.logger.log(ConversationEvent::new(
            "conversation_finished",
            json!({
                "state": run.state().as_str(),
                "reason": run.completion_reason(),
                "rounds": run.rounds(),
                "turns": transcript.len(),
                "error": error.as_ref().map(|e: &GatewayError| e.to_string()),
            }),
        ));
        progress.on_conversation_end(run.state(), run.completion_reason());

        Ok(ConversationOutcome {
            transcript,
            state: run.state(),
            reason: run.completion_reason(),
            rounds: run.rounds(),
            error,
            participants: roster.names().into_iter().map(String::from).collect(),
        })
    }

    fn record_turn(&self, turn: &Turn, progress: &dyn ConversationProgress) {
        self.logger.log(ConversationEvent::new(
            "turn",
            json!({
                "sequence": turn.sequence(),
                "speaker": turn.speaker(),
                "kind": turn.kind(),
                "content": turn.content(),
                "timestamp": turn.timestamp().to_rfc3339(),
            }),
        ));
        progress.on_turn_complete(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ScriptedAgent;
    use async_trait::async_trait;
    use crew_domain::{
        CodeArtifact, ExecutionReport, MarkerTermination, Participant, Role, SpeakerSelection,
    };
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct MockExecutor {
        work_dir: PathBuf,
        runs: Mutex<usize>,
    }

    impl MockExecutor {
        fn new() -> Self {
            Self {
                work_dir: PathBuf::from("work"),
                runs: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl CodeExecutorPort for MockExecutor {
        fn work_dir(&self) -> &Path {
            &self.work_dir
        }

        async fn execute(&self, _artifact: &CodeArtifact) -> ExecutionReport {
            *self.runs.lock().unwrap() += 1;
            ExecutionReport::new(0, "ok\n", "")
        }

        async fn run_command(&self, _program: &str, _args: &[String]) -> ExecutionReport {
            ExecutionReport::new(0, "", "")
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn agent(name: &str, role: Role) -> ScriptedAgent {
        ScriptedAgent::new(Participant::new(name, role).with_execution(false), Vec::<String>::new())
            .with_fallback(format!("{} speaking", name))
    }

    fn budgeted(name: &str, role: Role, max: usize) -> ScriptedAgent {
        ScriptedAgent::new(
            Participant::new(name, role)
                .with_execution(false)
                .with_max_auto_replies(Some(max)),
            Vec::<String>::new(),
        )
        .with_fallback(format!("{} speaking", name))
    }

    fn four_agents() -> Vec<ScriptedAgent> {
        vec![
            agent("C", Role::Coordinator),
            agent("G", Role::Generator),
            agent("R", Role::Reviewer),
            agent("T", Role::Tester),
        ]
    }

    fn use_case() -> RunConversationUseCase<MockExecutor> {
        RunConversationUseCase::new(Arc::new(MockExecutor::new()))
    }

    fn task() -> Task {
        Task::new("write function F").unwrap()
    }

    fn assert_contiguous(transcript: &Transcript) {
        for (i, turn) in transcript.turns().iter().enumerate() {
            assert_eq!(turn.sequence(), i);
        }
    }

    #[tokio::test]
    async fn test_four_participants_eight_rounds() {
        let config = ConversationConfig::new(8);
        let outcome = use_case()
            .execute(RunConversationInput::new(task(), four_agents(), config))
            .await
            .unwrap();

        assert_eq!(
            outcome.speakers(),
            vec!["C", "G", "R", "T", "C", "G", "R", "T"]
        );
        assert_eq!(outcome.transcript.len(), 8);
        assert_eq!(outcome.state, ConversationState::Completed);
        assert_eq!(outcome.reason, Some(CompletionReason::MaxRounds));
        assert_eq!(outcome.rounds, 8);
        assert!(outcome.error.is_none());
        assert_contiguous(&outcome.transcript);
    }

    #[tokio::test]
    async fn test_exactly_max_rounds_message_turns() {
        for rounds in 1..=6 {
            let outcome = use_case()
                .execute(RunConversationInput::new(
                    task(),
                    four_agents(),
                    ConversationConfig::new(rounds),
                ))
                .await
                .unwrap();
            assert_eq!(outcome.transcript.message_count(), rounds);
            assert_eq!(outcome.reason, Some(CompletionReason::MaxRounds));
        }
    }

    #[tokio::test]
    async fn test_seed_turn_holds_task() {
        let outcome = use_case()
            .execute(RunConversationInput::new(
                task(),
                four_agents(),
                ConversationConfig::new(1),
            ))
            .await
            .unwrap();
        let seed = &outcome.transcript.turns()[0];
        assert_eq!(seed.speaker(), "C");
        assert_eq!(seed.content(), "write function F");
        assert_eq!(outcome.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_each_agent_sees_full_transcript() {
        let agents: Vec<Arc<ScriptedAgent>> = four_agents().into_iter().map(Arc::new).collect();
        use_case()
            .execute(RunConversationInput::new(
                task(),
                agents.clone(),
                ConversationConfig::new(8),
            ))
            .await
            .unwrap();

        assert_eq!(agents[0].observed_lengths(), vec![4]);
        assert_eq!(agents[1].observed_lengths(), vec![1, 5]);
        assert_eq!(agents[3].observed_lengths(), vec![3, 7]);
    }

    #[tokio::test]
    async fn test_failure_on_third_speaker_aborts() {
        let agents: Vec<Box<dyn ConversationAgent>> = vec![
            Box::new(agent("C", Role::Coordinator)),
            Box::new(agent("G", Role::Generator)),
            Box::new(ScriptedAgent::failing(
                Participant::new("R", Role::Reviewer),
                GatewayError::RequestFailed("503".to_string()),
            )),
            Box::new(agent("T", Role::Tester)),
        ];
        let outcome = use_case()
            .execute(RunConversationInput::new(
                task(),
                agents,
                ConversationConfig::new(8),
            ))
            .await
            .unwrap();

        assert_eq!(outcome.state, ConversationState::Aborted);
        assert_eq!(outcome.transcript.len(), 2);
        assert!(matches!(outcome.error, Some(GatewayError::RequestFailed(_))));
        assert_eq!(outcome.reason, None);
    }

    #[tokio::test]
    async fn test_termination_marker_completes() {
        let agents = vec![
            agent("C", Role::Coordinator),
            ScriptedAgent::new(Participant::new("G", Role::Generator), ["draft", "final"]),
            ScriptedAgent::new(
                Participant::new("R", Role::Reviewer),
                ["needs work", "Approved. TERMINATE"],
            ),
        ];
        let config =
            ConversationConfig::new(20).with_termination(MarkerTermination::new("TERMINATE"));
        let outcome = use_case()
            .execute(RunConversationInput::new(task(), agents, config))
            .await
            .unwrap();

        assert_eq!(outcome.reason, Some(CompletionReason::TerminationMarker));
        assert_eq!(outcome.transcript.last().unwrap().speaker(), "R");
        assert_eq!(outcome.transcript.len(), 6);
    }

    #[tokio::test]
    async fn test_marker_ignored_by_default() {
        let agents = vec![
            agent("C", Role::Coordinator),
            ScriptedAgent::new(Participant::new("G", Role::Generator), Vec::<String>::new())
                .with_fallback("TERMINATE"),
        ];
        let outcome = use_case()
            .execute(RunConversationInput::new(
                task(),
                agents,
                ConversationConfig::new(5),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.reason, Some(CompletionReason::MaxRounds));
        assert_eq!(outcome.transcript.len(), 5);
    }

    #[tokio::test]
    async fn test_reply_budget_never_exceeded() {
        for seed in 0..16 {
            let agents = vec![
                budgeted("C", Role::Coordinator, 2),
                budgeted("G", Role::Generator, 2),
                budgeted("R", Role::Reviewer, 2),
            ];
            let config = ConversationConfig::new(30)
                .with_speaker_selection(SpeakerSelection::Random { seed });
            let outcome = use_case()
                .execute(RunConversationInput::new(task(), agents, config))
                .await
                .unwrap();

            assert_eq!(outcome.transcript.message_count(), 30);
            let speakers = outcome.speakers();
            for window in speakers.windows(3) {
                assert!(
                    !(window[0] == window[1] && window[1] == window[2]),
                    "seed {} produced three consecutive turns by {}",
                    seed,
                    window[0]
                );
            }
        }
    }

    #[tokio::test]
    async fn test_replies_exhausted_completes() {
        let agents = vec![
            budgeted("A", Role::Coordinator, 1),
            budgeted("B", Role::Generator, 0),
        ];
        let outcome = use_case()
            .execute(RunConversationInput::new(
                task(),
                agents,
                ConversationConfig::new(10),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.reason, Some(CompletionReason::RepliesExhausted));
        assert_eq!(outcome.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_executing_coordinator_adds_result_turns() {
        let agents = vec![
            ScriptedAgent::new(Participant::for_role(Role::Coordinator), Vec::<String>::new())
                .with_fallback("```python\nprint('ok')\n```"),
            agent("G", Role::Generator),
        ];
        let executor = Arc::new(MockExecutor::new());
        let outcome = RunConversationUseCase::new(Arc::clone(&executor))
            .execute(RunConversationInput::new(
                task(),
                agents,
                ConversationConfig::new(4),
            ))
            .await
            .unwrap();

        // seed, G, coordinator + result, G
        assert_eq!(outcome.transcript.message_count(), 4);
        assert_eq!(outcome.transcript.len(), 5);
        assert!(outcome.transcript.turns()[3].is_execution_result());
        assert_eq!(*executor.runs.lock().unwrap(), 1);
        assert_contiguous(&outcome.transcript);
    }

    #[tokio::test]
    async fn test_configuration_errors() {
        let err = use_case()
            .execute(RunConversationInput::new(
                task(),
                vec![agent("A", Role::Coordinator)],
                ConversationConfig::new(4),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunConversationError::Configuration(DomainError::TooFewParticipants { found: 1 })
        ));

        let err = use_case()
            .execute(RunConversationInput::new(
                task(),
                vec![agent("A", Role::Coordinator), agent("A", Role::Generator)],
                ConversationConfig::new(4),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunConversationError::Configuration(DomainError::DuplicateParticipant(_))
        ));

        let err = use_case()
            .execute(RunConversationInput::new(
                task(),
                four_agents(),
                ConversationConfig::new(0),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunConversationError::Configuration(DomainError::InvalidMaxRounds)
        ));
    }

    #[tokio::test]
    async fn test_logger_receives_events() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        use_case()
            .with_logger(logger.clone())
            .execute(RunConversationInput::new(
                task(),
                four_agents(),
                ConversationConfig::new(3),
            ))
            .await
            .unwrap();

        let events = logger.events.lock().unwrap();
        assert_eq!(events.first(), Some(&"conversation_started"));
        assert_eq!(events.iter().filter(|e| **e == "turn").count(), 3);
        assert_eq!(events.last(), Some(&"conversation_finished"));
    }
}

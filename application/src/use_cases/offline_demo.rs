//! Offline demonstration
//!
//! A canned Calculator conversation between the four default participants. It
//! runs through the regular coordinator with scripted agents and a simulated
//! executor, so it needs neither a language-model service nor an interpreter.

use crate::agent::ScriptedAgent;
use crate::ports::code_executor::CodeExecutorPort;
use async_trait::async_trait;
use crew_domain::{
    ArtifactLanguage, CodeArtifact, ConversationConfig, DomainError, ExecutionReport,
    MarkerTermination, Participant, Role, Roster, Task,
};
use std::path::{Path, PathBuf};

pub const DEMO_TASK: &str = "Create a Python Calculator class that:
1. Performs basic arithmetic (add, subtract, multiply, divide)
2. Raises a clear error on division by zero
3. Has memory functions (store and recall)
4. Keeps a history of the operations performed
Include type hints, docstrings and pytest tests.";

pub const DEMO_MAX_ROUNDS: usize = 12;

pub const TERMINATION_MARKER: &str = "TERMINATE";

const GENERATOR_REPLIES: [&str; 2] = [
    r#"Here is a first implementation.

```python
# filename: calculator.py
from typing import List


class Calculator:
    """Arithmetic with memory and history."""

    def __init__(self) -> None:
        self.memory: float = 0.0
        self.history: List[str] = []

    def _record(self, entry: str, result: float) -> float:
        self.history.append(f"{entry} = {result}")
        return result

    def add(self, a: float, b: float) -> float:
        return self._record(f"{a} + {b}", a + b)

    def subtract(self, a: float, b: float) -> float:
        return self._record(f"{a} - {b}", a - b)

    def multiply(self, a: float, b: float) -> float:
        return self._record(f"{a} * {b}", a * b)

    def divide(self, a: float, b: float) -> float:
        if b == 0:
            raise ZeroDivisionError("Cannot divide by zero")
        return self._record(f"{a} / {b}", a / b)

    def store(self, value: float) -> None:
        self.memory = value

    def recall(self) -> float:
        return self.memory
```

Each operation records itself in the history before returning."#,
    r#"Updated version with the review feedback applied: a `clear_history`
method and `recall` documented as returning 0.0 before anything is stored.

```python
# filename: calculator.py
from typing import List


class Calculator:
    """Arithmetic with memory and history."""

    def __init__(self) -> None:
        self.memory: float = 0.0
        self.history: List[str] = []

    def _record(self, entry: str, result: float) -> float:
        self.history.append(f"{entry} = {result}")
        return result

    def add(self, a: float, b: float) -> float:
        return self._record(f"{a} + {b}", a + b)

    def subtract(self, a: float, b: float) -> float:
        return self._record(f"{a} - {b}", a - b)

    def multiply(self, a: float, b: float) -> float:
        return self._record(f"{a} * {b}", a * b)

    def divide(self, a: float, b: float) -> float:
        if b == 0:
            raise ZeroDivisionError("Cannot divide by zero")
        return self._record(f"{a} / {b}", a / b)

    def store(self, value: float) -> None:
        self.memory = value

    def recall(self) -> float:
        """Stored value, 0.0 when nothing was stored."""
        return self.memory

    def clear_history(self) -> None:
        self.history.clear()
```"#,
];

const REVIEWER_REPLIES: [&str; 2] = [
    "The structure is clean and the division guard is correct. Suggestions:
- add a way to clear the history, it grows without bound
- document what `recall` returns before `store` was called
- consider rejecting non-numeric input early",
    "The history can now be cleared and `recall` is documented. The
implementation covers every requirement. Approved.",
];

const TESTER_REPLIES: [&str; 2] = [
    r#"Tests for the calculator:

```python
# filename: test_calculator.py
import pytest

from calculator import Calculator


@pytest.fixture
def calc():
    return Calculator()


def test_basic_operations(calc):
    assert calc.add(2, 3) == 5
    assert calc.subtract(5, 3) == 2
    assert calc.multiply(4, 3) == 12
    assert calc.divide(10, 4) == 2.5


def test_divide_by_zero(calc):
    with pytest.raises(ZeroDivisionError):
        calc.divide(1, 0)


def test_memory(calc):
    assert calc.recall() == 0.0
    calc.store(42)
    assert calc.recall() == 42


def test_history(calc):
    calc.add(1, 1)
    calc.multiply(2, 2)
    assert calc.history == ["1 + 1 = 2", "2 * 2 = 4"]
```"#,
    r#"One more test for the new method:

```python
# filename: test_calculator_history.py
from calculator import Calculator


def test_clear_history():
    calc = Calculator()
    calc.add(1, 2)
    calc.clear_history()
    assert calc.history == []
```"#,
];

const COORDINATOR_REPLIES: [&str; 2] = [
    "Running the test suite against the current implementation.

```sh
python3 -m pytest -q test_calculator.py
```",
    "The implementation meets all four requirements and the tests pass.

TERMINATE",
];

const SIMULATED_TEST_OUTPUT: &str = "....                                                                     [100%]
4 passed in 0.02s";

/// The canned demonstration conversation
pub struct OfflineDemo;

impl OfflineDemo {
    pub fn task() -> Result<Task, DomainError> {
        Task::new(DEMO_TASK)
    }

    /// Scripted agents for the default roster, in roster order
    pub fn agents() -> Vec<ScriptedAgent> {
        Roster::default_participants()
            .into_iter()
            .map(|participant| {
                let replies = Self::replies_for(participant.role());
                Self::scripted(participant, replies)
            })
            .collect()
    }

    pub fn config() -> ConversationConfig {
        ConversationConfig::new(DEMO_MAX_ROUNDS)
            .with_termination(MarkerTermination::new(TERMINATION_MARKER))
    }

    fn replies_for(role: Role) -> &'static [&'static str] {
        match role {
            Role::Coordinator => &COORDINATOR_REPLIES,
            Role::Generator => &GENERATOR_REPLIES,
            Role::Reviewer => &REVIEWER_REPLIES,
            Role::Tester => &TESTER_REPLIES,
        }
    }

    /// Said once the script is used up, so runs with other settings still finish
    fn closing_remark(role: Role) -> String {
        match role {
            Role::Coordinator => format!("Every requirement is covered.\n{}", TERMINATION_MARKER),
            Role::Generator => "The implementation above is my final version.".to_string(),
            Role::Reviewer => "No further review comments.".to_string(),
            Role::Tester => "The test suite above covers the requirements.".to_string(),
        }
    }

    fn scripted(participant: Participant, replies: &[&str]) -> ScriptedAgent {
        let remark = Self::closing_remark(participant.role());
        ScriptedAgent::new(participant, replies.iter().copied()).with_fallback(remark)
    }
}

/// Executor that pretends every artifact ran successfully
///
/// Nothing is written or spawned. Shell artifacts report a passing test run,
/// Python artifacts report no output.
pub struct SampleExecutor {
    work_dir: PathBuf,
}

impl SampleExecutor {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

impl Default for SampleExecutor {
    fn default() -> Self {
        Self::new("codecrew_workspace")
    }
}

#[async_trait]
impl CodeExecutorPort for SampleExecutor {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    async fn execute(&self, artifact: &CodeArtifact) -> ExecutionReport {
        let file_name = artifact
            .file_name()
            .map(String::from)
            .unwrap_or_else(|| format!("sample.{}", artifact.language().extension()));
        let stdout = match artifact.language() {
            ArtifactLanguage::Shell => SIMULATED_TEST_OUTPUT,
            ArtifactLanguage::Python => "",
        };
        ExecutionReport::new(0, stdout, "").with_artifact_path(self.work_dir.join(file_name))
    }

    async fn run_command(&self, _program: &str, _args: &[String]) -> ExecutionReport {
        ExecutionReport::new(0, SIMULATED_TEST_OUTPUT, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::run_conversation::{RunConversationInput, RunConversationUseCase};
    use crew_domain::{
        CompletionReason, ConversationState, SpeakerSelection, TurnKind, extract_artifacts,
    };
    use std::sync::Arc;

    #[test]
    fn test_every_scripted_code_block_is_runnable() {
        for reply in GENERATOR_REPLIES.iter().chain(TESTER_REPLIES.iter()) {
            assert_eq!(extract_artifacts(reply).len(), 1);
        }
        let artifacts = extract_artifacts(COORDINATOR_REPLIES[0]);
        assert_eq!(artifacts[0].language(), ArtifactLanguage::Shell);
    }

    #[tokio::test]
    async fn test_demo_conversation_terminates_on_marker() {
        let outcome = RunConversationUseCase::new(Arc::new(SampleExecutor::default()))
            .execute(RunConversationInput::new(
                OfflineDemo::task().unwrap(),
                OfflineDemo::agents(),
                OfflineDemo::config(),
            ))
            .await
            .unwrap();

        assert_eq!(outcome.state, ConversationState::Completed);
        assert_eq!(outcome.reason, Some(CompletionReason::TerminationMarker));
        assert_eq!(outcome.rounds, 9);
        assert_eq!(outcome.transcript.len(), 10);
        assert_eq!(
            outcome.transcript.turns()[5].kind(),
            TurnKind::ExecutionResult
        );
        assert!(
            outcome.transcript.turns()[5]
                .content()
                .contains("4 passed")
        );
    }

    async fn run_demo(config: ConversationConfig) -> crate::ConversationOutcome {
        RunConversationUseCase::new(Arc::new(SampleExecutor::default()))
            .execute(RunConversationInput::new(
                OfflineDemo::task().unwrap(),
                OfflineDemo::agents(),
                config,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_demo_with_other_marker_runs_to_max_rounds() {
        let outcome = run_demo(
            ConversationConfig::new(DEMO_MAX_ROUNDS)
                .with_termination(MarkerTermination::new("NEVER SAID")),
        )
        .await;

        assert_eq!(outcome.state, ConversationState::Completed);
        assert_eq!(outcome.reason, Some(CompletionReason::MaxRounds));
        assert!(outcome.error.is_none());
        assert_eq!(outcome.rounds, DEMO_MAX_ROUNDS);
    }

    #[tokio::test]
    async fn test_demo_with_random_selection_completes() {
        for seed in 0..20 {
            let outcome = run_demo(
                OfflineDemo::config().with_speaker_selection(SpeakerSelection::Random { seed }),
            )
            .await;
            assert_eq!(outcome.state, ConversationState::Completed, "seed {seed}");
            assert!(outcome.error.is_none(), "seed {seed}");
        }
    }

    #[tokio::test]
    async fn test_sample_executor_names_artifacts() {
        let executor = SampleExecutor::new("demo");
        let artifact = &extract_artifacts(TESTER_REPLIES[0])[0];
        let report = executor.execute(artifact).await;
        assert_eq!(
            report.artifact_path,
            Some(PathBuf::from("demo/test_calculator.py"))
        );
    }
}

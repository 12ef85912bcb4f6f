//! Progress reporting while a conversation runs

use colored::Colorize;
use crew_application::ConversationProgress;
use crew_domain::{CompletionReason, ConversationState, Participant, Roster, Turn, preview};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per turn
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut s| s.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn turn_label(turn: &Turn) -> String {
    if turn.is_execution_result() {
        let first_line = turn.content().lines().next().unwrap_or_default();
        format!("{} ran code: {}", turn.speaker(), first_line)
    } else {
        format!("{}: {}", turn.speaker(), preview(turn.content(), 60))
    }
}

impl ConversationProgress for ProgressReporter {
    fn on_conversation_start(&self, task: &str, roster: &Roster) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            preview(task, 60).bold(),
            roster.names().join(", ")
        );
    }

    fn on_turn_start(&self, round: usize, participant: &Participant) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message(format!("{} is working...", participant.name()));
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_turn_complete(&self, turn: &Turn) {
        let line = format!("{} {}", "v".green(), turn_label(turn));
        match self.take_spinner() {
            Some(pb) => pb.finish_with_message(line),
            None => eprintln!("  {}", line),
        }
    }

    fn on_speaker_skipped(&self, skipped: &Participant, chosen: &Participant) {
        eprintln!(
            "  {} {} is out of replies, {} speaks",
            "~".yellow(),
            skipped.name(),
            chosen.name()
        );
    }

    fn on_conversation_end(&self, state: ConversationState, reason: Option<CompletionReason>) {
        if let Some(pb) = self.take_spinner() {
            pb.abandon_with_message(format!("{} failed", "x".red()));
        }
        match (state, reason) {
            (ConversationState::Completed, Some(reason)) => {
                eprintln!("{} {}", "Done:".green().bold(), reason)
            }
            (state, _) => eprintln!("{} {}", "Done:".red().bold(), state),
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ConversationProgress for SimpleProgress {
    fn on_turn_start(&self, round: usize, participant: &Participant) {
        eprintln!("{} Round {}: {}", "->".cyan(), round, participant.name().bold());
    }

    fn on_turn_complete(&self, turn: &Turn) {
        eprintln!("  {} {}", "v".green(), turn_label(turn));
    }

    fn on_conversation_end(&self, state: ConversationState, reason: Option<CompletionReason>) {
        match reason {
            Some(reason) => eprintln!("{} ({})", state, reason),
            None => eprintln!("{}", state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{Transcript, TurnKind};

    #[test]
    fn test_turn_label() {
        let mut t = Transcript::new();
        let message = t
            .append("CodeAssistant", "Here is\nthe code", TurnKind::Message)
            .clone();
        assert_eq!(turn_label(&message), "CodeAssistant: Here is the code");

        let result = t
            .append(
                "UserProxyAgent",
                "exitcode: 0 (execution succeeded)\nCode output: (none)",
                TurnKind::ExecutionResult,
            )
            .clone();
        assert_eq!(
            turn_label(&result),
            "UserProxyAgent ran code: exitcode: 0 (execution succeeded)"
        );
    }
}

//! Console output formatter for conversation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use crew_application::{ConversationOutcome, EnvironmentReport};
use crew_domain::{ConversationState, ExecutionReport, Turn, preview};
use serde_json::json;

/// Formats conversation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete transcript
    pub fn format(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("codecrew Conversation"));
        output.push('\n');

        if let Some(task) = outcome.transcript.task() {
            output.push_str(&format!("{} {}\n\n", "Task:".cyan().bold(), preview(task, 100)));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            outcome.participants.join(", ")
        ));

        output.push_str(&Self::section_header("Transcript"));
        for turn in outcome.transcript.turns() {
            output.push_str(&Self::format_turn(turn));
        }

        output.push('\n');
        output.push_str(&Self::status_line(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format status, speaker order and the final message
    pub fn format_summary(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== codecrew Summary ===".cyan().bold()
        ));
        output.push_str(&Self::status_line(outcome));
        output.push_str(&format!(
            "{} {} rounds, {} turns\n",
            "Played:".dimmed(),
            outcome.rounds,
            outcome.transcript.len()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Speakers:".dimmed(),
            outcome.speakers().join(" -> ")
        ));

        if let Some(last) = outcome.transcript.turns().iter().rev().find(|t| t.is_message()) {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("Last message ({})", last.speaker()).yellow().bold(),
                last.content().trim_end()
            ));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ConversationOutcome) -> String {
        let value = json!({
            "state": outcome.state.as_str(),
            "reason": outcome.reason,
            "rounds": outcome.rounds,
            "participants": outcome.participants,
            "error": outcome.error.as_ref().map(|e| e.to_string()),
            "turns": outcome.transcript.turns(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the capability check
    pub fn format_environment(report: &EnvironmentReport) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Environment"));
        for status in &report.statuses {
            let mark = if status.available {
                "v".green()
            } else {
                "x".red()
            };
            output.push_str(&format!(
                "  {} {:<24} {}\n",
                mark,
                status.capability.display_name(),
                status.detail.dimmed()
            ));
        }
        let path = match report.demo_path() {
            crew_application::DemoPath::Live => "live conversation".green(),
            crew_application::DemoPath::Offline => "offline sample (no API key)".yellow(),
        };
        output.push_str(&format!("\n{} {}\n", "Demo path:".cyan().bold(), path));
        output
    }

    /// Format the result of the test-suite action
    pub fn format_test_report(command: &[String], report: &ExecutionReport) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header(&format!("Test suite: {}", command.join(" "))));
        let out = report.output();
        if !out.trim().is_empty() {
            output.push_str(out.trim_end());
            output.push('\n');
        }
        let status = if report.succeeded() {
            "passed".green().bold()
        } else if report.timed_out {
            "timed out".red().bold()
        } else {
            format!("failed (exit code {})", report.exit_code).red().bold()
        };
        output.push_str(&format!("\n{} {}\n", "Result:".cyan().bold(), status));
        output
    }

    fn format_turn(turn: &Turn) -> String {
        let title = if turn.is_execution_result() {
            format!("── #{} {} · execution ──", turn.sequence(), turn.speaker())
                .magenta()
                .bold()
        } else {
            format!("── #{} {} ──", turn.sequence(), turn.speaker())
                .yellow()
                .bold()
        };
        format!("\n{}\n{}\n", title, turn.content().trim_end())
    }

    fn status_line(outcome: &ConversationOutcome) -> String {
        match outcome.state {
            ConversationState::Completed => format!(
                "{} {}\n",
                "Completed:".green().bold(),
                outcome
                    .reason
                    .map(|r| r.description())
                    .unwrap_or("finished")
            ),
            ConversationState::Aborted => format!(
                "{} {}\n",
                "Aborted:".red().bold(),
                outcome
                    .error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".to_string())
            ),
            other => format!("{} {}\n", "State:".bold(), other),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &ConversationOutcome) -> String {
        ConsoleFormatter::format(outcome)
    }

    fn format_summary(&self, outcome: &ConversationOutcome) -> String {
        ConsoleFormatter::format_summary(outcome)
    }

    fn format_json(&self, outcome: &ConversationOutcome) -> String {
        ConsoleFormatter::format_json(outcome)
    }
}

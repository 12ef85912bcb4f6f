//! Output formatter trait

use crew_application::ConversationOutcome;
use crew_domain::OutputFormat;

/// Trait for formatting conversation outcomes
pub trait OutputFormatter {
    /// Every turn of the transcript
    fn format(&self, outcome: &ConversationOutcome) -> String;

    /// Status and speaker sequence only
    fn format_summary(&self, outcome: &ConversationOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &ConversationOutcome) -> String;

    fn render(&self, outcome: &ConversationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(outcome),
            OutputFormat::Summary => self.format_summary(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}

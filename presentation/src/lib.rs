//! Presentation layer for codecrew
//!
//! This crate contains CLI definitions, the interactive menu, output
//! formatters and progress reporters.

pub mod cli;
pub mod menu;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, RunArgs, SelectionArg};
pub use menu::{ConsoleMenu, MenuAction};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

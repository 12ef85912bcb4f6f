//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use crew_domain::SpeakerSelection;
use std::path::PathBuf;

/// Output format for conversation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every turn of the transcript
    Full,
    /// Status, speaker sequence and the last message
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for crew_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => crew_domain::OutputFormat::Full,
            OutputFormat::Summary => crew_domain::OutputFormat::Summary,
            OutputFormat::Json => crew_domain::OutputFormat::Json,
        }
    }
}

/// Speaker selection method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    /// Participants speak in roster order
    RoundRobin,
    /// Seeded pseudo-random order (use with --seed)
    Random,
}

impl SelectionArg {
    pub fn with_seed(self, seed: u64) -> SpeakerSelection {
        match self {
            SelectionArg::RoundRobin => SpeakerSelection::RoundRobin,
            SelectionArg::Random => SpeakerSelection::Random { seed },
        }
    }
}

/// CLI arguments for codecrew
#[derive(Parser, Debug)]
#[command(name = "codecrew")]
#[command(author, version, about = "A crew of LLM agents that write, review and test code together")]
#[command(long_about = r#"
codecrew runs a turn-based conversation between four participants:

  UserProxyAgent  coordinates the work and executes the code it posts
  CodeAssistant   writes the implementation
  CriticAgent     reviews it
  TestAgent       writes the tests

The conversation ends after --max-rounds rounds, when a participant says the
termination marker, or when nobody has replies left.

Configuration files are loaded from (in priority order):
1. CODECREW_* environment variables (e.g. CODECREW_LLM__MODEL)
2. --config <path>     Explicit config file
3. ./codecrew.toml     Project-level config
4. ~/.config/codecrew/config.toml   Global config

Example:
  codecrew run "Write a function that parses ISO dates"
  codecrew run --offline
  codecrew check
  codecrew
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a conversation on a task
    Run(RunArgs),
    /// Check API key, interpreter and test runner
    Check,
    /// Run the test suite in the working directory
    Test,
    /// Show the sample conversation (no API key needed)
    Sample,
    /// Interactive menu (default)
    Menu,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// The task for the crew (defaults to the Calculator demo task)
    pub task: Option<String>,

    /// Rounds including the task itself
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Replay the canned conversation instead of calling the model
    #[arg(long)]
    pub offline: bool,

    /// Speaker selection method
    #[arg(long, value_enum)]
    pub selection: Option<SelectionArg>,

    /// Seed for random selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// End the conversation when a message contains MARKER
    #[arg(long, value_name = "MARKER")]
    pub terminate_on: Option<String>,
}

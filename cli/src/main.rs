//! CLI entrypoint for codecrew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use crew_application::{
    CheckEnvironmentUseCase, CodeExecutorPort, ConversationAgent, ConversationLogger,
    ConversationOutcome, ConversationProgress, LlmAgent, NoProgress, OfflineDemo,
    RunConversationInput, RunConversationUseCase, RunTestSuiteUseCase, SampleExecutor,
};
use crew_domain::{ConversationConfig, MarkerTermination, SpeakerSelection, Task};
use crew_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, LocalCodeExecutor, OpenAiGateway,
    RetryConfig, RetryingGateway, SystemProbe,
};
use crew_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleMenu, MenuAction, OutputFormatter, ProgressReporter,
    RunArgs, SimpleProgress,
};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        println!("Configuration sources (highest priority first):");
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    info!("Starting codecrew");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", details);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .output
        .map(crew_domain::OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let app = App {
        config,
        format,
        quiet: cli.quiet,
    };

    let succeeded = match cli.command.unwrap_or(Command::Menu) {
        Command::Run(args) => app.run_conversation(&args).await?,
        Command::Check => app.check(),
        Command::Test => app.run_tests().await?,
        Command::Sample => app.sample().await?,
        Command::Menu => app.menu().await?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Console diagnostics from the `-v` count, plus an optional log file
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = fmt::layer().with_target(false).with_writer(io::stderr);

    let (file, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

/// Apply `run` flags on top of the configured conversation settings
fn apply_overrides(
    mut config: ConversationConfig,
    args: &RunArgs,
    configured_seed: u64,
) -> ConversationConfig {
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = max_rounds;
    }
    match (args.selection, args.seed) {
        (Some(selection), seed) => {
            config.speaker_selection = selection.with_seed(seed.unwrap_or(configured_seed));
        }
        (None, Some(seed)) => {
            if let SpeakerSelection::Random { .. } = config.speaker_selection {
                config.speaker_selection = SpeakerSelection::Random { seed };
            }
        }
        (None, None) => {}
    }
    if let Some(marker) = &args.terminate_on {
        config = config.with_termination(MarkerTermination::new(marker.clone()));
    }
    config
}

struct App {
    config: FileConfig,
    format: crew_domain::OutputFormat,
    quiet: bool,
}

impl App {
    async fn run_conversation(&self, args: &RunArgs) -> Result<bool> {
        if args.offline {
            return self.run_offline(args).await;
        }

        let Some(api_key) = self.config.llm.api_key() else {
            warn!("{} is not set, falling back to the offline demo", self.config.llm.api_key_env);
            if !self.quiet {
                eprintln!(
                    "{} {} is not set; replaying the offline demo instead.",
                    "!".yellow(),
                    self.config.llm.api_key_env
                );
            }
            return self.run_offline(args).await;
        };

        let settings = self.config.llm.to_model_settings()?;
        let gateway = OpenAiGateway::new(
            Some(self.config.llm.base_url.clone()),
            Some(api_key),
            Duration::from_secs(self.config.llm.timeout_seconds),
        )?;
        let gateway = Arc::new(RetryingGateway::new(
            gateway,
            RetryConfig::default().with_max_retries(self.config.llm.max_retries),
        ));

        let agents: Vec<_> = self
            .config
            .to_participants()?
            .into_iter()
            .map(|participant| LlmAgent::new(participant, Arc::clone(&gateway), settings.clone()))
            .collect();

        let task = match &args.task {
            Some(text) => Task::new(text.as_str())?,
            None => OfflineDemo::task()?,
        };
        let conversation = apply_overrides(
            self.config.conversation.to_conversation_config()?,
            args,
            self.config.conversation.seed,
        );
        let executor = Arc::new(LocalCodeExecutor::new(
            self.config.execution.to_execution_params()?,
        ));

        info!("Using model {} via {}", settings.model(), self.config.llm.base_url);
        self.converse(executor, RunConversationInput::new(task, agents, conversation))
            .await
    }

    async fn run_offline(&self, args: &RunArgs) -> Result<bool> {
        if args.task.is_some() {
            warn!("The offline demo replays its own task; the given task is ignored");
        }
        let conversation = apply_overrides(OfflineDemo::config(), args, self.config.conversation.seed);
        let input = RunConversationInput::new(OfflineDemo::task()?, OfflineDemo::agents(), conversation);
        self.converse(Arc::new(SampleExecutor::new(&self.config.execution.work_dir)), input)
            .await
    }

    async fn converse<A, E>(&self, executor: Arc<E>, input: RunConversationInput<A>) -> Result<bool>
    where
        A: ConversationAgent,
        E: CodeExecutorPort,
    {
        let mut use_case = RunConversationUseCase::new(executor)
            .with_behavior(self.config.conversation.to_behavior_config()?);

        if let Some(path) = &self.config.output.transcript_log {
            let logger = JsonlConversationLogger::open(path)
                .with_context(|| format!("Failed to open transcript log {}", path.display()))?;
            info!("Logging conversation events to {}", path.display());
            let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
            use_case = use_case.with_logger(logger);
        }

        let progress = self.progress();
        let outcome = use_case
            .execute_with_progress(input, progress.as_ref())
            .await?;

        self.print_outcome(&outcome);
        Ok(outcome.is_completed())
    }

    fn progress(&self) -> Box<dyn ConversationProgress> {
        let silent = self.quiet
            || !self.config.output.show_progress
            || self.format == crew_domain::OutputFormat::Json;
        if silent {
            Box::new(NoProgress)
        } else if io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    fn print_outcome(&self, outcome: &ConversationOutcome) {
        println!("{}", ConsoleFormatter.render(outcome, self.format));
    }

    fn check(&self) -> bool {
        let test_runner = self
            .config
            .execution
            .test_command
            .first()
            .cloned()
            .unwrap_or_default();
        let probe = SystemProbe::new(
            self.config.llm.api_key_env.clone(),
            self.config.execution.python.clone(),
            test_runner,
        );
        let report = CheckEnvironmentUseCase::new(Arc::new(probe)).execute();
        println!("{}", ConsoleFormatter::format_environment(&report));
        true
    }

    async fn run_tests(&self) -> Result<bool> {
        let params = self.config.execution.to_execution_params()?;
        let command = params.test_command.clone();
        let executor = Arc::new(LocalCodeExecutor::new(params));
        let report = RunTestSuiteUseCase::new(executor).execute(&command).await?;
        println!("{}", ConsoleFormatter::format_test_report(&command, &report));
        Ok(report.succeeded())
    }

    async fn sample(&self) -> Result<bool> {
        let input =
            RunConversationInput::new(OfflineDemo::task()?, OfflineDemo::agents(), OfflineDemo::config());
        let outcome = RunConversationUseCase::new(Arc::new(SampleExecutor::default()))
            .execute(input)
            .await?;
        println!("{}", ConsoleFormatter::format(&outcome));
        Ok(outcome.is_completed())
    }

    async fn menu(&self) -> Result<bool> {
        let stdin = io::stdin();
        let mut menu = ConsoleMenu::new(stdin.lock(), io::stdout());

        loop {
            let action = menu.next_action()?;
            let result = match action {
                MenuAction::CheckSetup => Ok(self.check()),
                MenuAction::RunConversation => self.run_conversation(&RunArgs::default()).await,
                MenuAction::RunTests => self.run_tests().await,
                MenuAction::ShowSample => self.sample().await,
                MenuAction::Exit => break,
            };
            if let Err(e) = result {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
        }

        println!("Goodbye!");
        Ok(true)
    }
}

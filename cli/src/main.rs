//! CLI entrypoint for collab-forum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use forum_application::{
    ConversationLogger, InMemorySettings, NoConversationLogger, Resolver, SettingsProvider,
    TurnScheduler,
};
use forum_domain::{ConfigIssue, ForumSettings};
use forum_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, build_generation_clients, http_client,
};
use forum_presentation::{
    ChatRepl, Cli, ConsoleFormatter, Indicator, OutputConfig, ProgressReporter, ReplConfig,
    SessionPrinter, export_transcript,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_tracing(cli.verbose, config.logging.log_file.as_deref())?;
    info!("Starting collab-forum");

    report_issues(&config.validate())?;

    let output = OutputConfig {
        color: config.output.color,
        show_progress: config.output.show_progress,
    }
    .with_quiet(cli.quiet);
    output.apply();

    let env_settings = config.forum_settings(|name| std::env::var(name).ok());
    let forum_settings = apply_overrides(&cli, env_settings)?;
    report_issues(&config.credential_issues(&forum_settings))?;
    let settings = Arc::new(InMemorySettings::new(forum_settings));

    // === Dependency Injection ===
    let scheduler = build_scheduler(&config, settings.clone())?;

    match cli.topic.clone() {
        Some(topic) => run_headless(&cli, &output, scheduler, settings, topic).await,
        None => {
            let repl_config = ReplConfig {
                history_file: config
                    .repl
                    .history_file
                    .clone()
                    .or_else(ConfigLoader::default_history_path),
            };
            ChatRepl::new(scheduler, settings)
                .with_progress(output.show_progress)
                .with_config(&repl_config)
                .run()
                .await?;
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level, optionally mirrored to a file
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("log_file has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print configuration issues; abort when any is an error.
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        eprintln!("{}", ConsoleFormatter::issue(issue));
    }
    if ConfigIssue::has_errors(issues) {
        bail!("Invalid configuration");
    }
    Ok(())
}

/// Command-line flags take precedence over the configuration files.
fn apply_overrides(cli: &Cli, mut settings: ForumSettings) -> Result<ForumSettings> {
    for m in &cli.modes {
        settings
            .modes
            .set(m.identity, m.mode)
            .with_context(|| format!("--mode {}={}", m.identity.key(), m.mode))?;
    }
    if let Some(delay) = cli.delay {
        settings.tuning = settings.tuning.with_response_delay(delay);
    }
    Ok(settings)
}

fn build_scheduler(config: &FileConfig, settings: Arc<InMemorySettings>) -> Result<TurnScheduler> {
    let primary = config.primary();
    let http = http_client().context("Failed to create HTTP client")?;
    let clients = build_generation_clients(&http, &config.endpoints());

    let primary_client = clients
        .iter()
        .find(|client| client.identity() == primary)
        .cloned()
        .with_context(|| format!("No backend configured for primary {}", primary))?;

    let resolver = clients
        .into_iter()
        .fold(
            Resolver::builder(primary_client)
                .with_behavior(config.behavior())
                .with_offline_source(Arc::new(config.offline_responses())),
            |builder, client| builder.with_direct_client(client),
        )
        .build();

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => Arc::new(
            JsonlConversationLogger::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Arc::new(NoConversationLogger),
    };

    Ok(TurnScheduler::new(
        config.rotation(),
        resolver,
        settings,
        logger,
    )?)
}

/// Run one discussion without a prompt until Ctrl-C or the turn limit.
async fn run_headless(
    cli: &Cli,
    output: &OutputConfig,
    scheduler: TurnScheduler,
    settings: Arc<InMemorySettings>,
    topic: String,
) -> Result<()> {
    let indicator = if output.show_progress {
        Indicator::Spinner(ProgressReporter::new())
    } else {
        Indicator::Silent
    };
    let mut printer = SessionPrinter::new(indicator);
    let mut rx = scheduler.subscribe();

    println!("{}\n", ConsoleFormatter::header("AI Collab Chat"));
    scheduler.start(topic)?;

    loop {
        let snapshot = rx.borrow_and_update().clone();
        printer.render(&snapshot);

        if !snapshot.is_running {
            break;
        }
        if let Some(max) = cli.max_turns
            && snapshot.turns_taken() >= max
        {
            scheduler.stop();
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                scheduler.stop();
            }
        }
    }
    drop(printer);

    let snapshot = scheduler.snapshot();
    println!("Discussion ended after {} turns.", snapshot.turns_taken());

    if cli.export.is_some() {
        let master_prompt = settings.current().master_prompt;
        match export_transcript(&snapshot, &master_prompt, cli.export_path())
            .context("Failed to write transcript")?
        {
            Some(path) => println!("Transcript saved to {}", path.display()),
            None => println!("Nothing to export."),
        }
    }

    Ok(())
}

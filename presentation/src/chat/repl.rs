//! REPL (Read-Eval-Print Loop) for an interactive discussion

use super::command::ReplCommand;
use super::feed::{Indicator, SessionPrinter};
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::output::transcript::export_transcript;
use colored::Colorize;
use forum_application::{InMemorySettings, SettingsProvider, TurnScheduler};
use forum_domain::{Identity, ResolutionMode};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Interactive forum REPL
///
/// Reads commands while the scheduler's pacing loop runs in the background;
/// replies are printed as they are appended.
pub struct ChatRepl {
    scheduler: TurnScheduler,
    settings: Arc<InMemorySettings>,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(scheduler: TurnScheduler, settings: Arc<InMemorySettings>) -> Self {
        Self {
            scheduler,
            settings,
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to announce which participant is thinking
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_config(mut self, config: &ReplConfig) -> Self {
        self.history_file = config.history_file.clone();
        self
    }

    /// Run the interactive REPL.
    ///
    /// Requires the multi-threaded tokio runtime: line editing blocks in place.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        let indicator = if self.show_progress {
            Indicator::Line
        } else {
            Indicator::Silent
        };
        let printer = tokio::spawn(SessionPrinter::new(indicator).follow(self.scheduler.subscribe()));

        loop {
            let readline = tokio::task::block_in_place(|| rl.readline(">>> "));

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(command) => {
                            if self.handle_command(command) {
                                break;
                            }
                        }
                        Err(usage) => println!("{}", usage),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if self.scheduler.is_running() {
                        self.scheduler.stop();
                        println!("^C (discussion stopped)");
                    } else {
                        println!("^C");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.scheduler.stop();
        printer.abort();

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          AI Collab Chat - Forum Mode        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Participants: {}",
            self.scheduler
                .rotation()
                .iter()
                .map(|i| i.display_name())
                .collect::<Vec<_>>()
                .join(" → ")
        );
        println!();
        println!("Type a topic to start a discussion, or /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <topic>                  - Start a discussion on <topic>");
        println!("  /start <topic>           - Start (or restart) a discussion");
        println!("  /stop                    - Stop the discussion");
        println!("  /clear                   - Stop and forget the transcript");
        println!("  /export [path]           - Save the transcript to a file");
        println!("  /mode <identity> <mode>  - offline, proxied or direct");
        println!("  /delay <seconds>         - Pause between turns");
        println!("  /status                  - Show session and participants");
        println!("  /help, /h, /?            - Show this help");
        println!("  /quit, /exit, /q         - Exit");
        println!();
    }

    /// Handle one command. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Start(topic) => {
                println!();
                if let Err(e) = self.scheduler.start(topic) {
                    println!("{} {}", "Error:".red(), e);
                }
            }
            ReplCommand::Stop => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                    println!("Discussion stopped.");
                } else {
                    println!("No discussion is running.");
                }
            }
            ReplCommand::Clear => {
                self.scheduler.clear();
                println!("Transcript cleared.");
            }
            ReplCommand::Export(path) => self.export(path.as_deref()),
            ReplCommand::Mode(identity, mode) => self.set_mode(identity, mode),
            ReplCommand::Delay(seconds) => {
                self.settings.set_response_delay(seconds);
                println!("Delay between turns set to {}s.", seconds);
            }
            ReplCommand::Status => {
                let settings = self.settings.current();
                print!(
                    "\n{}\n",
                    ConsoleFormatter::status(
                        &self.scheduler.snapshot(),
                        self.scheduler.rotation(),
                        self.scheduler.primary(),
                        &settings,
                    )
                );
            }
        }
        false
    }

    fn set_mode(&self, identity: Identity, mode: ResolutionMode) {
        match self.settings.set_mode(identity, mode) {
            Ok(()) => println!("{} now resolves in {} mode.", identity, mode),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    fn export(&self, path: Option<&Path>) {
        let master_prompt = self.settings.current().master_prompt;
        match export_transcript(&self.scheduler.snapshot(), &master_prompt, path) {
            Ok(Some(written)) => println!("Transcript saved to {}", written.display()),
            Ok(None) => println!("Nothing to export yet."),
            Err(e) => println!("{} failed to write transcript: {}", "Error:".red(), e),
        }
    }
}

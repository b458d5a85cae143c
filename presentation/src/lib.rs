//! Presentation layer for collab-forum
//!
//! This crate contains the CLI definition, console formatting, the
//! "thinking" indicator, transcript export and the interactive prompt.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, Indicator, SessionPrinter};
pub use cli::commands::{Cli, ModeOverride};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::transcript::{default_export_name, export_transcript};
pub use progress::reporter::ProgressReporter;

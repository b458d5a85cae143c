//! Interactive and headless session display
//!
//! Provides the readline-based forum prompt and the snapshot printer shared
//! with headless runs.

mod command;
mod feed;
mod repl;

pub use command::ReplCommand;
pub use feed::{Indicator, MessageFeed, SessionPrinter};
pub use repl::ChatRepl;

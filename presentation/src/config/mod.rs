//! Presentation-level configuration
//!
//! Configuration for console output and REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show the "thinking" indicator
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply `--quiet` on top of the configured values.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        if quiet {
            self.show_progress = false;
        }
        self
    }

    /// Force colors off process-wide when disabled.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Path to history file; no history is kept when unset
    pub history_file: Option<PathBuf>,
}

//! Log destinations from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// conversation_log = "~/.local/share/collab-forum/forum.jsonl"
/// log_file = "/tmp/collab-forum.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving forum events
    pub conversation_log: Option<PathBuf>,
    /// File receiving diagnostic logs in addition to stderr
    pub log_file: Option<PathBuf>,
}

//! CLI command definitions

use clap::Parser;
use forum_domain::{Identity, MAX_RESPONSE_DELAY_SECONDS, ResolutionMode};
use std::path::PathBuf;

/// CLI arguments for collab-forum
#[derive(Parser, Debug)]
#[command(name = "collab-forum")]
#[command(author, version, about = "AI Collab Chat - several AIs discuss one topic in turn")]
#[command(long_about = r#"
collab-forum runs a round-robin discussion between AI participants
(Grok, Gemini, OpenAI, DeepSeek, Z.ai) on a topic you provide.

Each participant's reply is obtained in one of three modes:
  offline   canned lines, no network (default)
  proxied   the primary backend role-plays the participant
  direct    the participant's own API (needs its key)

With a topic the discussion runs headless until Ctrl-C or --max-turns.
Without one an interactive prompt opens.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./forum.toml        Project-level config
3. ~/.config/collab-forum/config.toml   Global config

Example:
  collab-forum "Is Rust a good first language?"
  collab-forum --mode grok=direct --mode openai=proxied --max-turns 10 "Tabs or spaces?"
  collab-forum --export transcript.txt --max-turns 5 "Monorepos"
"#)]
pub struct Cli {
    /// Discussion topic (omit for interactive mode)
    pub topic: Option<String>,

    /// Resolution mode override, IDENTITY=MODE (can be specified multiple times)
    #[arg(short, long = "mode", value_name = "IDENTITY=MODE", value_parser = parse_mode_override)]
    pub modes: Vec<ModeOverride>,

    /// Seconds to wait between turns
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_delay)]
    pub delay: Option<f64>,

    /// Stop after this many AI turns (headless mode)
    #[arg(short = 'n', long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Write the transcript when the discussion ends (default file name if no path)
    #[arg(long, value_name = "PATH")]
    pub export: Option<Option<PathBuf>>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Explicit export path; `None` when `--export` was given without one.
    pub fn export_path(&self) -> Option<&std::path::Path> {
        self.export.as_ref().and_then(|path| path.as_deref())
    }
}

/// One `--mode IDENTITY=MODE` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeOverride {
    pub identity: Identity,
    pub mode: ResolutionMode,
}

fn parse_mode_override(s: &str) -> Result<ModeOverride, String> {
    let (identity, mode) = s
        .split_once('=')
        .ok_or_else(|| format!("expected IDENTITY=MODE, got '{}'", s))?;
    let identity: Identity = identity.trim().parse().map_err(|e| format!("{}", e))?;
    if identity.is_human() {
        return Err("the human participant has no resolution mode".to_string());
    }
    let mode: ResolutionMode = mode.trim().parse().map_err(|e| format!("{}", e))?;
    Ok(ModeOverride { identity, mode })
}

fn parse_delay(s: &str) -> Result<f64, String> {
    let secs: f64 = s.trim().parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=MAX_RESPONSE_DELAY_SECONDS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!(
            "must be between 0 and {} seconds",
            MAX_RESPONSE_DELAY_SECONDS
        ))
    }
}

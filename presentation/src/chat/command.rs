//! Slash command parsing for the interactive prompt

use forum_domain::{Identity, MAX_RESPONSE_DELAY_SECONDS, ResolutionMode};
use std::path::PathBuf;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Start (or restart) a discussion; bare text is treated as a topic
    Start(String),
    Stop,
    Clear,
    Export(Option<PathBuf>),
    Mode(Identity, ResolutionMode),
    Delay(f64),
    Status,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse one trimmed, non-empty input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ReplCommand::Start(line.to_string()));
        };
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "start" | "s" => {
                if args.is_empty() {
                    Err("Usage: /start <topic>".to_string())
                } else {
                    Ok(ReplCommand::Start(args.to_string()))
                }
            }
            "stop" => Ok(ReplCommand::Stop),
            "clear" => Ok(ReplCommand::Clear),
            "export" => Ok(ReplCommand::Export(
                (!args.is_empty()).then(|| PathBuf::from(args)),
            )),
            "mode" => {
                let mut parts = args.split_whitespace();
                let (Some(identity), Some(mode), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err("Usage: /mode <identity> <offline|proxied|direct>".to_string());
                };
                let identity: Identity = identity.parse().map_err(|e| format!("{}", e))?;
                let mode: ResolutionMode = mode.parse().map_err(|e| format!("{}", e))?;
                Ok(ReplCommand::Mode(identity, mode))
            }
            "delay" => args
                .parse::<f64>()
                .ok()
                .filter(|secs| (0.0..=MAX_RESPONSE_DELAY_SECONDS).contains(secs))
                .map(ReplCommand::Delay)
                .ok_or_else(|| {
                    format!(
                        "Usage: /delay <seconds> (0 to {})",
                        MAX_RESPONSE_DELAY_SECONDS
                    )
                }),
            "status" => Ok(ReplCommand::Status),
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            _ => Err(format!(
                "Unknown command: /{}\nType /help for available commands",
                name
            )),
        }
    }
}

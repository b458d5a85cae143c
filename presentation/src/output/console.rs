//! Console output formatter for forum messages

use colored::{Color, Colorize};
use forum_domain::{
    ChatSnapshot, ConfigIssue, ForumSettings, Identity, Message, Rotation, Severity,
};

/// Formats transcript entries and session status for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn color_for(identity: Identity) -> Color {
        match identity {
            Identity::User => Color::Cyan,
            Identity::Grok => Color::BrightWhite,
            Identity::Gemini => Color::Blue,
            Identity::OpenAi => Color::Green,
            Identity::DeepSeek => Color::Magenta,
            Identity::Zai => Color::Yellow,
        }
    }

    /// One transcript entry: a colored author line followed by the content.
    pub fn message(message: &Message) -> String {
        let tag = format!("[{}]", message.author.display_name());
        if message.is_error {
            format!(
                "{}\n{} {}\n",
                tag.red().bold(),
                "Error:".red(),
                message.content.red()
            )
        } else {
            format!(
                "{}\n{}\n",
                tag.color(Self::color_for(message.author)).bold(),
                message.content
            )
        }
    }

    /// Notice shown when the session halted without a transcript entry
    pub fn halted(reason: &str) -> String {
        format!("{} {}", "Discussion halted:".red().bold(), reason)
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}", line.dimmed(), title.cyan().bold(), line.dimmed())
    }

    /// Session and settings overview for `/status`
    pub fn status(
        snapshot: &ChatSnapshot,
        rotation: &Rotation,
        primary: Identity,
        settings: &ForumSettings,
    ) -> String {
        let mut output = String::new();

        let state = if snapshot.is_running {
            "running".green().bold()
        } else {
            "stopped".yellow().bold()
        };
        output.push_str(&format!("{} {}\n", "Session:".cyan().bold(), state));
        if !snapshot.topic.is_empty() {
            output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), snapshot.topic));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Turns:".cyan().bold(),
            snapshot.turns_taken()
        ));
        if let Some(identity) = snapshot.resolving {
            output.push_str(&format!("{} {}\n", "Thinking:".cyan().bold(), identity));
        }
        if let Some(err) = &snapshot.last_error {
            output.push_str(&format!("{} {}\n", "Last error:".cyan().bold(), err.red()));
        }

        output.push_str(&format!("\n{}\n", "Participants:".cyan().bold()));
        let next = (!rotation.is_empty()).then(|| rotation.at(snapshot.turn_pointer));
        for identity in rotation.iter() {
            let mode = if identity == primary {
                "primary".to_string()
            } else {
                settings
                    .modes
                    .mode_for(identity)
                    .unwrap_or_default()
                    .to_string()
            };
            let key = if settings.credentials.contains(identity) {
                "key set".green()
            } else {
                "no key".dimmed()
            };
            let marker = if Some(identity) == next && snapshot.is_running {
                ">"
            } else {
                " "
            };
            output.push_str(&format!(
                " {} {:<10} {:<8} {}\n",
                marker,
                identity.display_name(),
                mode,
                key
            ));
        }

        output.push_str(&format!(
            "\n{} {}s\n",
            "Delay:".cyan().bold(),
            settings.tuning.response_delay().as_secs_f64()
        ));
        output
    }

    pub fn issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
        }
    }
}

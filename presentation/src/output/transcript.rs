//! Transcript export to a text file

use chrono::NaiveDate;
use forum_domain::{ChatSnapshot, render_transcript};
use std::io;
use std::path::{Path, PathBuf};

/// `ai-collab-chat-YYYY-MM-DD.txt`
pub fn default_export_name(date: NaiveDate) -> String {
    format!("ai-collab-chat-{}.txt", date.format("%Y-%m-%d"))
}

/// Write the transcript of `snapshot` to `path`, or to today's default file
/// name in the working directory.
///
/// Returns the written path, or `None` when the log is empty and nothing
/// was written.
pub fn export_transcript(
    snapshot: &ChatSnapshot,
    master_prompt: &str,
    path: Option<&Path>,
) -> io::Result<Option<PathBuf>> {
    let Some(text) = render_transcript(snapshot, master_prompt) else {
        return Ok(None);
    };

    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_export_name(chrono::Local::now().date_naive())),
    };
    std::fs::write(&path, text)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_domain::{Identity, Message};

    #[test]
    fn test_default_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(default_export_name(date), "ai-collab-chat-2024-03-07.txt");
    }

    #[test]
    fn test_export_writes_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        let snapshot = ChatSnapshot {
            topic: "Monorepos".to_string(),
            messages: vec![
                Message::human("Monorepos"),
                Message::reply(Identity::DeepSeek, "They scale with tooling."),
            ],
            ..ChatSnapshot::default()
        };

        let written = export_transcript(&snapshot, "Be brief.", Some(&path)).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("AI Collab Chat\nTopic: Monorepos\nMaster Prompt: Be brief.\n"));
        assert!(text.ends_with("[DeepSeek]:\nThey scale with tooling."));
    }

    #[test]
    fn test_empty_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");

        let written = export_transcript(&ChatSnapshot::default(), "p", Some(&path)).unwrap();
        assert!(written.is_none());
        assert!(!path.exists());
    }
}

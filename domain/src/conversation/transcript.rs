//! Plain-text transcript export

use super::store::ChatSnapshot;

const TITLE: &str = "AI Collab Chat";
const RULE: &str = "========================================";

/// Render the snapshot as a plain-text transcript.
///
/// Layout: a header with topic and master prompt, a rule, then every message
/// as `[Author]:\n<content>` separated by a blank line, in log order.
/// Returns `None` for an empty log.
pub fn render_transcript(snapshot: &ChatSnapshot, master_prompt: &str) -> Option<String> {
    if snapshot.messages.is_empty() {
        return None;
    }

    let mut out = format!(
        "{}\nTopic: {}\nMaster Prompt: {}\n\n{}\n\n",
        TITLE, snapshot.topic, master_prompt, RULE
    );

    let blocks: Vec<String> = snapshot
        .messages
        .iter()
        .map(|msg| format!("[{}]:\n{}", msg.author.display_name(), msg.content))
        .collect();
    out.push_str(&blocks.join("\n\n"));

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::Message;
    use crate::core::identity::Identity;

    fn snapshot() -> ChatSnapshot {
        ChatSnapshot {
            topic: "Tabs or spaces?".to_string(),
            messages: vec![
                Message::human("Tabs or spaces?"),
                Message::reply(Identity::Grok, "Spaces."),
                Message::error(Identity::Gemini, "Gemini API key not provided."),
            ],
            ..ChatSnapshot::default()
        }
    }

    #[test]
    fn test_exact_layout() {
        let text = render_transcript(&snapshot(), "Be nice.").unwrap();
        assert_eq!(
            text,
            "AI Collab Chat\nTopic: Tabs or spaces?\nMaster Prompt: Be nice.\n\n\
             ========================================\n\n\
             [User]:\nTabs or spaces?\n\n\
             [Grok]:\nSpaces.\n\n\
             [Gemini]:\nGemini API key not provided."
        );
    }

    #[test]
    fn test_reproducible() {
        let snap = snapshot();
        assert_eq!(
            render_transcript(&snap, "p"),
            render_transcript(&snap.clone(), "p")
        );
    }

    #[test]
    fn test_empty_log_exports_nothing() {
        assert!(render_transcript(&ChatSnapshot::default(), "p").is_none());
    }
}

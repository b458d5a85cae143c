//! History projection: the shared log as seen by one backend.
//!
//! Every backend perceives itself as the model and everyone else, the
//! human included, as user input. Replies from other AI participants are
//! prefixed with their name so the target can tell them apart from the
//! human's messages.

use super::message::Message;
use crate::core::identity::Identity;
use serde::{Deserialize, Serialize};

/// Role of a projected entry from the target backend's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectedRole {
    /// Written by the target identity itself
    Model,
    /// Written by anyone else
    User,
}

/// One entry of a projected history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedTurn {
    pub role: ProjectedRole,
    pub text: String,
}

impl ProjectedTurn {
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ProjectedRole::Model,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ProjectedRole::User,
            text: text.into(),
        }
    }
}

/// Attribution prefix for a reply written by another AI participant
pub fn attribute(author: Identity, content: &str) -> String {
    format!("[{}]: {}", author.display_name(), content)
}

/// Project `messages` for `target`, one entry per message, order preserved.
///
/// Recomputed for every resolution; the result depends on the target.
/// The most recent entry is always presented as user input, even when
/// `target` wrote it, so a backend is never asked to continue its own
/// last reply.
pub fn project_history(messages: &[Message], target: Identity) -> Vec<ProjectedTurn> {
    let mut projected: Vec<ProjectedTurn> = messages
        .iter()
        .map(|msg| {
            if msg.author == target {
                ProjectedTurn::model(msg.content.clone())
            } else if msg.author.is_human() {
                ProjectedTurn::user(msg.content.clone())
            } else {
                ProjectedTurn::user(attribute(msg.author, &msg.content))
            }
        })
        .collect();

    if let (Some(last), Some(source)) = (projected.last_mut(), messages.last())
        && last.role == ProjectedRole::Model
    {
        *last = ProjectedTurn::user(attribute(source.author, &source.content));
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> Vec<Message> {
        vec![
            Message::human("hi"),
            Message::reply(Identity::Grok, "x"),
            Message::reply(Identity::Gemini, "y"),
            Message::reply(Identity::OpenAi, "z"),
        ]
    }

    #[test]
    fn test_roles_from_target_perspective() {
        let projected = project_history(&log(), Identity::Gemini);
        assert_eq!(
            projected,
            vec![
                ProjectedTurn::user("hi"),
                ProjectedTurn::user("[Grok]: x"),
                ProjectedTurn::model("y"),
                ProjectedTurn::user("[OpenAI]: z"),
            ]
        );
    }

    #[test]
    fn test_human_text_is_never_prefixed() {
        let projected = project_history(&log(), Identity::Zai);
        assert_eq!(projected[0].text, "hi");
        assert!(projected.iter().all(|t| t.role == ProjectedRole::User));
    }

    #[test]
    fn test_projection_changes_with_target() {
        let log = log();
        let for_grok = project_history(&log, Identity::Grok);
        let for_openai = project_history(&log, Identity::OpenAi);
        assert_eq!(for_grok[1], ProjectedTurn::model("x"));
        assert_eq!(for_openai[1], ProjectedTurn::user("[Grok]: x"));
    }

    #[test]
    fn test_last_entry_forced_to_user() {
        let log = vec![
            Message::human("hi"),
            Message::reply(Identity::Gemini, "first"),
            Message::reply(Identity::Grok, "second"),
            Message::reply(Identity::Gemini, "third"),
        ];
        let projected = project_history(&log, Identity::Gemini);
        assert_eq!(projected[1], ProjectedTurn::model("first"));
        assert_eq!(projected[3], ProjectedTurn::user("[Gemini]: third"));
    }

    #[test]
    fn test_error_entries_are_projected() {
        let log = vec![
            Message::human("hi"),
            Message::error(Identity::DeepSeek, "Request timed out after 30s"),
        ];
        let projected = project_history(&log, Identity::Grok);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[1].text, "[DeepSeek]: Request timed out after 30s");
    }

    #[test]
    fn test_empty_log() {
        assert!(project_history(&[], Identity::Grok).is_empty());
    }
}

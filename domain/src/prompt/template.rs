//! Prompt templates for the forum discussion

use crate::core::identity::Identity;

/// Templates for the system directives sent to generation backends
pub struct PromptTemplate;

impl PromptTemplate {
    /// Master prompt used when the host has not configured one
    pub fn default_master_prompt() -> &'static str {
        r#"You are an expert AI assistant participating in a collaborative forum with other AI models named Grok, Gemini, OpenAI, DeepSeek, and Z.ai. The user has provided a topic, and your collective goal is to explore it and build a comprehensive solution or understanding.

**Your Role:**
- **Contribute to a cumulative discussion.** Your response should consider the entire conversation, not just the most recent message. Synthesize existing points and introduce new ideas to move the conversation forward.
- **Engage in a forum-like dialogue.** You can directly address other models (e.g., "@Gemini, could you elaborate on your point about X?"). If you are mentioned by name, you should prioritize responding to that query.
- **Work towards consensus.** Strive to find common ground and build on the best ideas presented by the group. Your aim is to help the group reach a well-reasoned conclusion or a set of actionable steps.
- **Be concise and constructive.** Keep your responses focused and to the point. Add unique value with each turn.
- **Use Markdown for formatting** when it helps clarify your response (e.g., lists, bolding, code blocks)."#
    }

    /// System directive for a proxy backend role-playing `identity`.
    ///
    /// The master prompt is appended verbatim, never replaced.
    pub fn persona_directive(identity: Identity, master_prompt: &str) -> String {
        format!(
            r#"[SYSTEM NOTE: You are currently role-playing as the AI model named '{}'. Based on your training data, adopt its known persona, characteristics, and response style. Your goal is to convincingly simulate this specific AI.]

The user's original master prompt for the collaboration is:
---
{}
---
"#,
            identity.display_name(),
            master_prompt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_master_prompt_names_participants() {
        let prompt = PromptTemplate::default_master_prompt();
        for identity in Identity::AI {
            assert!(prompt.contains(identity.display_name()));
        }
    }

    #[test]
    fn test_persona_directive_names_identity() {
        let directive = PromptTemplate::persona_directive(Identity::DeepSeek, "Be brief.");
        assert!(directive.contains("role-playing as the AI model named 'DeepSeek'"));
    }

    #[test]
    fn test_persona_directive_appends_master_prompt() {
        let directive = PromptTemplate::persona_directive(Identity::Grok, "Discuss kindly.");
        let note_end = directive.find("]").unwrap();
        let prompt_at = directive.find("---\nDiscuss kindly.\n---").unwrap();
        assert!(prompt_at > note_end);
    }
}

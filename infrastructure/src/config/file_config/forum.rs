//! Forum configuration from TOML (`[forum]` section)

use forum_domain::{ConfigIssue, ConfigIssueCode, DomainError, Identity, Rotation};
use serde::{Deserialize, Serialize};

/// Who takes part and in which order.
///
/// # Example
///
/// ```toml
/// [forum]
/// rotation = ["grok", "gemini", "openai", "deepseek", "zai"]
/// primary = "gemini"
/// master_prompt = "Discuss like senior engineers."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileForumConfig {
    /// Replaces the built-in master prompt when set
    pub master_prompt: Option<String>,
    /// Identity keys in turn order
    pub rotation: Vec<String>,
    /// Identity able to role-play the others
    pub primary: String,
}

impl Default for FileForumConfig {
    fn default() -> Self {
        Self {
            master_prompt: None,
            rotation: Identity::AI.iter().map(|i| i.key().to_string()).collect(),
            primary: Identity::default_primary().key().to_string(),
        }
    }
}

impl FileForumConfig {
    /// Parse the primary identity, falling back to the default on error.
    pub fn parse_primary(&self) -> (Identity, Vec<ConfigIssue>) {
        match self.primary.parse::<Identity>() {
            Ok(identity) if !identity.is_human() => (identity, Vec::new()),
            _ => (
                Identity::default_primary(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownIdentity {
                        field: "forum.primary".to_string(),
                        value: self.primary.clone(),
                    },
                    format!(
                        "forum.primary: '{}' is not an AI participant",
                        self.primary
                    ),
                )],
            ),
        }
    }

    /// Parse the rotation, falling back to the default order on error.
    pub fn parse_rotation(&self) -> (Rotation, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut order = Vec::with_capacity(self.rotation.len());

        for key in &self.rotation {
            match key.parse::<Identity>() {
                Ok(identity) => order.push(identity),
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownIdentity {
                        field: "forum.rotation".to_string(),
                        value: key.clone(),
                    },
                    format!("forum.rotation: unknown identity '{}'", key),
                )),
            }
        }
        if !issues.is_empty() {
            return (Rotation::default(), issues);
        }

        match Rotation::new(order) {
            Ok(rotation) => (rotation, issues),
            Err(e) => {
                issues.push(rotation_issue(&e));
                (Rotation::default(), issues)
            }
        }
    }
}

fn rotation_issue(err: &DomainError) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::InvalidRotation,
        format!("forum.rotation: {}", err),
    )
}

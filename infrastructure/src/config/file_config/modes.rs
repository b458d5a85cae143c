//! Resolution modes from TOML (`[modes]` section)
//!
//! ```toml
//! [modes]
//! grok = "proxied"
//! openai = "direct"
//! deepseek = "offline"
//! ```

use forum_domain::{ConfigIssue, ConfigIssueCode, Identity, ModeTable, ResolutionMode};
use std::collections::BTreeMap;

/// `[modes]` table: identity key to mode name
pub type FileModesConfig = BTreeMap<String, String>;

const VALID_MODES: [&str; 3] = ["offline", "proxied", "direct"];

/// Build the mode table, skipping entries that cannot be applied.
pub fn parse_modes(modes: &FileModesConfig, primary: Identity) -> (ModeTable, Vec<ConfigIssue>) {
    let mut table = ModeTable::new(primary);
    let mut issues = Vec::new();

    for (key, value) in modes {
        let field = format!("modes.{}", key);

        let identity = match key.parse::<Identity>() {
            Ok(identity) if !identity.is_human() => identity,
            _ => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownIdentity {
                        field: "modes".to_string(),
                        value: key.clone(),
                    },
                    format!("{}: '{}' is not an AI participant", field, key),
                ));
                continue;
            }
        };

        let mode = match value.parse::<ResolutionMode>() {
            Ok(mode) => mode,
            Err(_) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: field.clone(),
                        value: value.clone(),
                        valid_values: VALID_MODES.iter().map(|m| m.to_string()).collect(),
                    },
                    format!("{}: unknown mode '{}'", field, value),
                ));
                continue;
            }
        };

        if table.set(identity, mode).is_err() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: field.clone(),
                    value: value.clone(),
                    valid_values: Vec::new(),
                },
                format!(
                    "{}: {} is the primary identity and always answers directly, ignored",
                    field, identity
                ),
            ));
        }
    }

    (table, issues)
}

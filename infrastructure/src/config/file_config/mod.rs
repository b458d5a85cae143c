//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! types, collecting [`ConfigIssue`]s along the way.

mod behavior;
mod forum;
mod logging;
mod modes;
mod output;
mod providers;
mod repl;
mod tuning;

pub use behavior::FileBehaviorConfig;
pub use forum::FileForumConfig;
pub use logging::FileLoggingConfig;
pub use modes::{FileModesConfig, parse_modes};
pub use output::FileOutputConfig;
pub use providers::{
    FileProviderConfig, FileProvidersConfig, default_api_key_env, resolve_credentials,
    resolve_endpoint,
};
pub use repl::FileReplConfig;
pub use tuning::FileTuningConfig;

use crate::offline::CannedResponses;
use crate::providers::ProviderEndpoint;
use forum_application::BehaviorConfig;
use forum_domain::{
    ConfigIssue, ConfigIssueCode, ForumSettings, Identity, PromptTemplate, ResolutionMode,
    Rotation,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Participants, turn order and master prompt
    pub forum: FileForumConfig,
    /// Generation knobs and turn pacing
    pub tuning: FileTuningConfig,
    /// Resolution mode per non-primary identity
    pub modes: FileModesConfig,
    /// Backend endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Extra or replacement canned lines per identity
    pub offline: BTreeMap<String, Vec<String>>,
    /// Timeout and offline latency
    pub behavior: FileBehaviorConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Credentials are not checked here; see [`FileConfig::credential_issues`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (primary, primary_issues) = self.forum.parse_primary();
        issues.extend(primary_issues);
        issues.extend(self.forum.parse_rotation().1);
        issues.extend(self.tuning.to_tuning().1);
        issues.extend(parse_modes(&self.modes, primary).1);
        issues.extend(providers::validate_providers(&self.providers));
        issues.extend(self.behavior.to_behavior().1);

        for key in self.offline.keys() {
            if !matches!(key.parse::<Identity>(), Ok(i) if !i.is_human()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownIdentity {
                        field: "offline".to_string(),
                        value: key.clone(),
                    },
                    format!("[offline] {}: not an AI participant, ignored", key),
                ));
            }
        }

        issues
    }

    pub fn primary(&self) -> Identity {
        self.forum.parse_primary().0
    }

    pub fn rotation(&self) -> Rotation {
        self.forum.parse_rotation().0
    }

    pub fn behavior(&self) -> BehaviorConfig {
        self.behavior.to_behavior().0
    }

    /// Endpoint of every AI identity, overrides applied
    pub fn endpoints(&self) -> Vec<ProviderEndpoint> {
        Identity::AI
            .into_iter()
            .filter_map(|identity| resolve_endpoint(&self.providers, identity))
            .collect()
    }

    /// Built-in canned lines merged with the `[offline]` table
    pub fn offline_responses(&self) -> CannedResponses {
        self.offline
            .iter()
            .filter_map(|(key, lines)| Some((key.parse::<Identity>().ok()?, lines)))
            .fold(CannedResponses::builtin(), |canned, (identity, lines)| {
                canned.with_lines(identity, lines.clone())
            })
    }

    /// Initial forum settings; credentials are read through `lookup`.
    pub fn forum_settings(&self, lookup: impl Fn(&str) -> Option<String>) -> ForumSettings {
        let master_prompt = self
            .forum
            .master_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(PromptTemplate::default_master_prompt())
            .to_string();

        ForumSettings {
            master_prompt,
            tuning: self.tuning.to_tuning().0,
            modes: parse_modes(&self.modes, self.primary()).0,
            credentials: resolve_credentials(&self.providers, lookup),
        }
    }

    /// Warnings for rotation identities whose mode needs a missing key.
    pub fn credential_issues(&self, settings: &ForumSettings) -> Vec<ConfigIssue> {
        let primary = self.primary();
        let rotation = self.rotation();
        let mut missing = Vec::new();

        let needs_primary_key = rotation.iter().any(|identity| {
            identity == primary || settings.modes.mode_for(identity) == Some(ResolutionMode::Proxied)
        });
        if needs_primary_key && !settings.credentials.contains(primary) {
            missing.push(primary);
        }
        for identity in rotation.iter() {
            if settings.modes.mode_for(identity) == Some(ResolutionMode::Direct)
                && !settings.credentials.contains(identity)
            {
                missing.push(identity);
            }
        }

        missing
            .into_iter()
            .map(|identity| {
                let var = providers_env_hint(&self.providers, identity);
                ConfigIssue::warning(
                    ConfigIssueCode::MissingCredential {
                        identity: identity.key().to_string(),
                    },
                    format!(
                        "{} API key not set ({}); its turns will be recorded as errors",
                        identity, var
                    ),
                )
            })
            .collect()
    }
}

fn providers_env_hint(providers: &FileProvidersConfig, identity: Identity) -> String {
    providers
        .get(identity.key())
        .and_then(|p| p.api_key_env.clone())
        .or_else(|| default_api_key_env(identity).map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_application::OfflineResponseSource;
    use forum_domain::Severity;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[forum]
rotation = ["openai", "gemini", "grok"]
master_prompt = "Argue, then agree."

[tuning]
temperature = 0.2
response_delay_seconds = 0.5

[modes]
grok = "proxied"
openai = "direct"

[providers.openai]
api_key_env = "MY_OPENAI"

[offline]
gemini = ["Gemini offline line."]

[behavior]
timeout_seconds = 12

[logging]
conversation_log = "forum.jsonl"

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let order: Vec<_> = config.rotation().iter().collect();
        assert_eq!(order, vec![Identity::OpenAi, Identity::Gemini, Identity::Grok]);
        assert_eq!(config.behavior().timeout, Duration::from_secs(12));
        assert!(!config.output.color);
        assert!(config.offline_responses().has_lines(Identity::Gemini));

        let settings = config.forum_settings(|name| (name == "MY_OPENAI").then(|| "sk".into()));
        assert_eq!(settings.master_prompt, "Argue, then agree.");
        assert_eq!(settings.tuning.temperature, 0.2);
        assert_eq!(settings.tuning.top_k, 40);
        assert_eq!(
            settings.modes.mode_for(Identity::Grok),
            Some(ResolutionMode::Proxied)
        );
        assert_eq!(settings.credentials.get(Identity::OpenAi), Some("sk"));
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.primary(), Identity::Gemini);
        assert_eq!(config.rotation().len(), 5);
        assert_eq!(config.endpoints().len(), 5);
        assert!(config.output.color);

        let settings = config.forum_settings(|_| None);
        assert_eq!(
            settings.master_prompt,
            PromptTemplate::default_master_prompt()
        );
    }

    #[test]
    fn test_missing_credentials_reported() {
        let config: FileConfig = toml::from_str(
            r#"
[modes]
openai = "direct"
"#,
        )
        .unwrap();
        let settings = config.forum_settings(|_| None);
        let issues = config.credential_issues(&settings);

        let identities: Vec<_> = issues
            .iter()
            .map(|i| match &i.code {
                ConfigIssueCode::MissingCredential { identity } => identity.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(identities, vec!["gemini", "openai"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_validate_collects_all_sections() {
        let config: FileConfig = toml::from_str(
            r#"
[forum]
primary = "nobody"
rotation = []

[tuning]
top_k = 0

[modes]
grok = "sometimes"
"#,
        )
        .unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(ConfigIssue::has_errors(&issues));
    }
}

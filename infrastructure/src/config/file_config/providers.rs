//! Backend configuration from TOML (`[providers.<identity>]` sections)

use crate::providers::ProviderEndpoint;
use forum_domain::{ConfigIssue, ConfigIssueCode, Credentials, Identity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides for one identity's backend. Unset fields keep the built-in values.
///
/// ```toml
/// [providers.openai]
/// api_key_env = "OPENAI_API_KEY"
/// model = "gpt-4o-mini"
/// base_url = "https://api.openai.com/v1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Inline API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Role name used for other participants' turns (chat-completions only)
    pub user_role: Option<String>,
}

/// `[providers]` table keyed by identity key
pub type FileProvidersConfig = BTreeMap<String, FileProviderConfig>;

/// Environment variable consulted when `api_key_env` is not set
pub fn default_api_key_env(identity: Identity) -> Option<&'static str> {
    match identity {
        Identity::User => None,
        Identity::Gemini => Some("GEMINI_API_KEY"),
        Identity::OpenAi => Some("OPENAI_API_KEY"),
        Identity::Grok => Some("XAI_API_KEY"),
        Identity::DeepSeek => Some("DEEPSEEK_API_KEY"),
        Identity::Zai => Some("ZAI_API_KEY"),
    }
}

/// Flag keys under `[providers]` that do not name an AI participant.
pub fn validate_providers(providers: &FileProvidersConfig) -> Vec<ConfigIssue> {
    providers
        .keys()
        .filter(|key| !matches!(key.parse::<Identity>(), Ok(i) if !i.is_human()))
        .map(|key| {
            ConfigIssue::warning(
                ConfigIssueCode::UnknownIdentity {
                    field: "providers".to_string(),
                    value: key.clone(),
                },
                format!("[providers.{}] does not name an AI participant, ignored", key),
            )
        })
        .collect()
}

fn section_for(
    providers: &FileProvidersConfig,
    identity: Identity,
) -> Option<&FileProviderConfig> {
    providers
        .iter()
        .find(|(key, _)| key.parse::<Identity>().ok() == Some(identity))
        .map(|(_, section)| section)
}

/// Built-in endpoint for `identity` with any configured overrides applied.
pub fn resolve_endpoint(
    providers: &FileProvidersConfig,
    identity: Identity,
) -> Option<ProviderEndpoint> {
    let mut endpoint = ProviderEndpoint::defaults(identity)?;
    if let Some(section) = section_for(providers, identity) {
        if let Some(base_url) = &section.base_url {
            endpoint.base_url = base_url.clone();
        }
        if let Some(model) = &section.model {
            endpoint.model = model.clone();
        }
        if let Some(role) = &section.user_role {
            endpoint.user_role = Some(role.clone());
        }
    }
    Some(endpoint)
}

/// Collect API keys: inline `api_key` first, then the configured variable.
///
/// `lookup` reads an environment variable; tests pass a closure.
pub fn resolve_credentials(
    providers: &FileProvidersConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Credentials {
    let mut credentials = Credentials::new();
    for identity in Identity::AI {
        let section = section_for(providers, identity);
        let inline = section.and_then(|s| s.api_key.clone());
        let var = section
            .and_then(|s| s.api_key_env.clone())
            .or_else(|| default_api_key_env(identity).map(str::to_string));

        if let Some(key) = inline.or_else(|| var.as_deref().and_then(&lookup)) {
            credentials.insert(identity, key);
        }
    }
    credentials
}

//! Generation backends
//!
//! Gemini speaks its own `generateContent` API; every other identity is
//! served by an OpenAI-compatible chat-completions endpoint.

pub mod chat_completions;
pub mod gemini;

pub use chat_completions::ChatCompletionsClient;
pub use gemini::GeminiClient;

use forum_application::GenerationClient;
use forum_domain::Identity;
use reqwest::Client;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    ChatCompletions,
}

impl ProviderKind {
    pub fn for_identity(identity: Identity) -> Option<Self> {
        match identity {
            Identity::User => None,
            Identity::Gemini => Some(ProviderKind::Gemini),
            _ => Some(ProviderKind::ChatCompletions),
        }
    }
}

/// Where and how to reach one identity's backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub identity: Identity,
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    /// Chat-completions role for non-self turns; `None` means "user"
    pub user_role: Option<String>,
}

impl ProviderEndpoint {
    /// Built-in endpoint for `identity`; `None` for the human.
    pub fn defaults(identity: Identity) -> Option<Self> {
        let kind = ProviderKind::for_identity(identity)?;
        let (base_url, model, user_role) = match identity {
            Identity::Gemini => (gemini::DEFAULT_BASE_URL, gemini::DEFAULT_MODEL, None),
            Identity::OpenAi => ("https://api.openai.com/v1", "gpt-4o-mini", None),
            // x.ai historically expected "human" for user turns
            Identity::Grok => ("https://api.x.ai/v1", "grok-1", Some("human")),
            Identity::DeepSeek => ("https://api.deepseek.com/v1", "deepseek-chat", None),
            Identity::Zai => ("https://api.z.ai/v1", "z-alpha-chat", None),
            Identity::User => return None,
        };
        Some(Self {
            identity,
            kind,
            base_url: base_url.to_string(),
            model: model.to_string(),
            user_role: user_role.map(str::to_string),
        })
    }

    pub fn client(&self, http: &Client) -> Arc<dyn GenerationClient> {
        match self.kind {
            ProviderKind::Gemini => Arc::new(GeminiClient::new(
                http.clone(),
                self.base_url.clone(),
                self.model.clone(),
            )),
            ProviderKind::ChatCompletions => {
                let client = ChatCompletionsClient::new(
                    self.identity,
                    http.clone(),
                    self.base_url.clone(),
                    self.model.clone(),
                );
                match &self.user_role {
                    Some(role) => Arc::new(client.with_user_role(role.clone())),
                    None => Arc::new(client),
                }
            }
        }
    }
}

/// Shared HTTP client for every backend
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("collab-forum/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// One generation client per endpoint, sharing a connection pool.
pub fn build_generation_clients(
    http: &Client,
    endpoints: &[ProviderEndpoint],
) -> Vec<Arc<dyn GenerationClient>> {
    endpoints.iter().map(|endpoint| endpoint.client(http)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ai_identity_has_an_endpoint() {
        for identity in Identity::AI {
            let endpoint = ProviderEndpoint::defaults(identity).unwrap();
            assert_eq!(endpoint.identity, identity);
            assert!(endpoint.base_url.starts_with("https://"));
        }
        assert!(ProviderEndpoint::defaults(Identity::User).is_none());
    }

    #[test]
    fn test_clients_keep_identity() {
        let http = Client::new();
        let endpoints: Vec<_> = Identity::AI
            .into_iter()
            .filter_map(ProviderEndpoint::defaults)
            .collect();
        let clients = build_generation_clients(&http, &endpoints);
        let identities: Vec<_> = clients.iter().map(|c| c.identity()).collect();
        assert_eq!(identities, Identity::AI.to_vec());
    }
}

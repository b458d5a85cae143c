//! OpenAI-compatible chat completions client.
//!
//! Serves OpenAI, Grok, DeepSeek and Z.ai, which all speak the same
//! `/chat/completions` dialect with bearer authentication.

use async_trait::async_trait;
use forum_application::{GenerationClient, GenerationError, GenerationRequest};
use forum_domain::{Identity, ProjectedRole};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for one chat-completions backend
#[derive(Clone)]
pub struct ChatCompletionsClient {
    identity: Identity,
    http: Client,
    base_url: String,
    model: String,
    /// Role name sent for non-self turns
    user_role: String,
}

impl ChatCompletionsClient {
    pub fn new(
        identity: Identity,
        http: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            http,
            base_url: base_url.into(),
            model: model.into(),
            user_role: "user".to_string(),
        }
    }

    pub fn with_user_role(mut self, role: impl Into<String>) -> Self {
        self.user_role = role.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_body<'a>(&'a self, request: &GenerationRequest<'a>) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 1);
        messages.push(ChatMessage {
            role: "system",
            content: request.system_directive,
        });
        messages.extend(request.history.iter().map(|turn| ChatMessage {
            role: match turn.role {
                ProjectedRole::Model => "assistant",
                ProjectedRole::User => self.user_role.as_str(),
            },
            content: &turn.text,
        }));

        ChatRequest {
            model: &self.model,
            messages,
            temperature: request.tuning.temperature,
            top_p: request.tuning.top_p,
            max_tokens: request.tuning.max_output_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl GenerationClient for ChatCompletionsClient {
    fn identity(&self) -> Identity {
        self.identity
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        let body = self.build_body(request);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(request.credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("{}: {}", self.identity, e)))?;

        Ok(parsed.text())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

//! Gemini `generateContent` client.
//!
//! The projected history maps directly onto Gemini's `contents`: the resolving
//! identity's own turns become `model`, everything else `user`. The system
//! directive goes into `systemInstruction` and every tuning knob into
//! `generationConfig`.

use async_trait::async_trait;
use forum_application::{GenerationClient, GenerationError, GenerationRequest};
use forum_domain::{Identity, ProjectedRole, TuningSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";

/// Client for the Gemini REST API
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn identity(&self) -> Identity {
        Identity::Gemini
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::from_request(request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", request.credential)
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

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Gemini: {}", e)))?;

        Ok(parsed.text())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Instruction<'a>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &GenerationRequest<'a>) -> Self {
        let contents = request
            .history
            .iter()
            .map(|turn| Content {
                role: match turn.role {
                    ProjectedRole::Model => "model",
                    ProjectedRole::User => "user",
                },
                parts: vec![Part { text: &turn.text }],
            })
            .collect();

        Self {
            contents,
            system_instruction: Instruction {
                parts: vec![Part {
                    text: request.system_directive,
                }],
            },
            generation_config: GenerationConfig::from(request.tuning),
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Instruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl From<&TuningSettings> for GenerationConfig {
    fn from(tuning: &TuningSettings) -> Self {
        Self {
            temperature: tuning.temperature,
            top_p: tuning.top_p,
            top_k: tuning.top_k,
            max_output_tokens: tuning.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate; empty when the backend produced none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_domain::ProjectedTurn;

    #[test]
    fn test_request_shape() {
        let history = vec![
            ProjectedTurn::user("Topic"),
            ProjectedTurn::user("[Grok]: first"),
            ProjectedTurn::model("my earlier reply"),
        ];
        let tuning = TuningSettings::default();
        let request = GenerationRequest {
            credential: "key",
            system_directive: "Be helpful.",
            history: &history,
            tuning: &tuning,
        };

        let json = serde_json::to_value(GenerateContentRequest::from_request(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "[Grok]: first");
        assert_eq!(json["contents"][2]["role"], "model");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be helpful.");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
        assert!(json["generationConfig"].get("temperature").is_some());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(Client::new(), "https://example.test/v1beta/", "gemini-x");
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"forum"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), "Hello forum");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = GeminiClient::new(Client::new(), "http://127.0.0.1:9", DEFAULT_MODEL);
        let tuning = TuningSettings::default();
        let request = GenerationRequest {
            credential: "key",
            system_directive: "",
            history: &[],
            tuning: &tuning,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}

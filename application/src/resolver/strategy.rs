//! Resolution strategies, one per mode.

use super::error::ResolveError;
use crate::config::OfflineLatency;
use crate::ports::generation_client::{GenerationClient, GenerationRequest};
use crate::ports::offline_source::OfflineResponseSource;
use async_trait::async_trait;
use forum_domain::{
    Credentials, Identity, ProjectedTurn, PromptTemplate, ResolutionMode, TuningSettings,
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Inputs of a single resolution
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    pub identity: Identity,
    pub master_prompt: &'a str,
    /// History projected for `identity`
    pub history: &'a [ProjectedTurn],
    pub credentials: &'a Credentials,
    pub tuning: &'a TuningSettings,
}

/// One way of obtaining an identity's reply.
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    fn mode(&self) -> ResolutionMode;

    async fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<String, ResolveError>;
}

/// Race a generation call against the ceiling; a late reply is dropped with the future.
async fn generate_within(
    client: &dyn GenerationClient,
    ceiling: Duration,
    identity: Identity,
    request: &GenerationRequest<'_>,
) -> Result<String, ResolveError> {
    match tokio::time::timeout(ceiling, client.generate(request)).await {
        Ok(result) => result.map_err(ResolveError::from),
        Err(_) => Err(ResolveError::Timeout { identity, ceiling }),
    }
}

/// Calls the identity's own backend with its own credential.
pub struct DirectGeneration {
    client: Arc<dyn GenerationClient>,
    timeout: Duration,
}

impl DirectGeneration {
    pub fn new(client: Arc<dyn GenerationClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ResolutionStrategy for DirectGeneration {
    fn mode(&self) -> ResolutionMode {
        ResolutionMode::Direct
    }

    async fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<String, ResolveError> {
        let identity = request.identity;
        let credential = request
            .credentials
            .get(identity)
            .ok_or(ResolveError::MissingCredential(identity))?;

        debug!(
            "Direct generation for {} ({} history entries)",
            identity,
            request.history.len()
        );

        let generation = GenerationRequest {
            credential,
            system_directive: request.master_prompt,
            history: request.history,
            tuning: request.tuning,
        };
        generate_within(self.client.as_ref(), self.timeout, identity, &generation).await
    }
}

/// Asks the primary backend to role-play another identity.
pub struct ProxiedGeneration {
    primary: Arc<dyn GenerationClient>,
    timeout: Duration,
}

impl ProxiedGeneration {
    pub fn new(primary: Arc<dyn GenerationClient>, timeout: Duration) -> Self {
        Self { primary, timeout }
    }
}

#[async_trait]
impl ResolutionStrategy for ProxiedGeneration {
    fn mode(&self) -> ResolutionMode {
        ResolutionMode::Proxied
    }

    async fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<String, ResolveError> {
        let proxy = self.primary.identity();
        let credential = request
            .credentials
            .get(proxy)
            .ok_or(ResolveError::MissingCredential(proxy))?;

        debug!("{} role-playing {}", proxy, request.identity);

        let directive = PromptTemplate::persona_directive(request.identity, request.master_prompt);
        let generation = GenerationRequest {
            credential,
            system_directive: &directive,
            history: request.history,
            tuning: request.tuning,
        };
        generate_within(
            self.primary.as_ref(),
            self.timeout,
            request.identity,
            &generation,
        )
        .await
    }
}

/// Picks a canned line after a short simulated delay.
pub struct OfflineReplies {
    source: Arc<dyn OfflineResponseSource>,
    latency: OfflineLatency,
}

impl OfflineReplies {
    pub fn new(source: Arc<dyn OfflineResponseSource>, latency: OfflineLatency) -> Self {
        Self { source, latency }
    }
}

#[async_trait]
impl ResolutionStrategy for OfflineReplies {
    fn mode(&self) -> ResolutionMode {
        ResolutionMode::Offline
    }

    async fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<String, ResolveError> {
        // ThreadRng is !Send, so the draw finishes before the first await.
        let line = {
            let lines = self.source.lines(request.identity).unwrap_or_default();
            lines.choose(&mut rand::thread_rng()).cloned()
        };
        let Some(line) = line else {
            return Err(ResolveError::UnknownIdentity {
                identity: request.identity,
                mode: ResolutionMode::Offline,
            });
        };

        let delay = self.latency.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::generation_client::GenerationError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct RecordingClient {
        identity: Identity,
        reply: Result<String, GenerationError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl RecordingClient {
        fn new(identity: Identity, reply: Result<String, GenerationError>) -> Self {
            Self {
                identity,
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationClient for RecordingClient {
        fn identity(&self) -> Identity {
            self.identity
        }

        async fn generate(
            &self,
            request: &GenerationRequest<'_>,
        ) -> Result<String, GenerationError> {
            self.seen.lock().unwrap().push((
                request.credential.to_string(),
                request.system_directive.to_string(),
            ));
            self.reply.clone()
        }
    }

    struct SlowClient;

    #[async_trait]
    impl GenerationClient for SlowClient {
        fn identity(&self) -> Identity {
            Identity::Gemini
        }

        async fn generate(&self, _: &GenerationRequest<'_>) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok("too late".into())
        }
    }

    struct Lines(HashMap<Identity, Vec<String>>);

    impl OfflineResponseSource for Lines {
        fn lines(&self, identity: Identity) -> Option<&[String]> {
            self.0.get(&identity).map(Vec::as_slice)
        }
    }

    fn request<'a>(
        identity: Identity,
        credentials: &'a Credentials,
        tuning: &'a TuningSettings,
    ) -> ResolutionRequest<'a> {
        ResolutionRequest {
            identity,
            master_prompt: "Be brief.",
            history: &[],
            credentials,
            tuning,
        }
    }

    #[tokio::test]
    async fn test_direct_requires_own_credential() {
        let client = Arc::new(RecordingClient::new(Identity::OpenAi, Ok("hi".into())));
        let strategy = DirectGeneration::new(client, Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::Gemini, "g-key");
        let tuning = TuningSettings::default();

        let err = strategy
            .resolve(&request(Identity::OpenAi, &creds, &tuning))
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingCredential(Identity::OpenAi));
    }

    #[tokio::test]
    async fn test_direct_passes_master_prompt_and_key() {
        let client = Arc::new(RecordingClient::new(Identity::OpenAi, Ok("hi".into())));
        let strategy = DirectGeneration::new(client.clone(), Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::OpenAi, "sk-1");
        let tuning = TuningSettings::default();

        let reply = strategy
            .resolve(&request(Identity::OpenAi, &creds, &tuning))
            .await
            .unwrap();
        assert_eq!(reply, "hi");
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0], ("sk-1".to_string(), "Be brief.".to_string()));
    }

    #[tokio::test]
    async fn test_proxied_uses_primary_key_and_persona() {
        let primary = Arc::new(RecordingClient::new(Identity::Gemini, Ok("as grok".into())));
        let strategy = ProxiedGeneration::new(primary.clone(), Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::Gemini, "g-key");
        let tuning = TuningSettings::default();

        let reply = strategy
            .resolve(&request(Identity::Grok, &creds, &tuning))
            .await
            .unwrap();
        assert_eq!(reply, "as grok");

        let seen = primary.seen.lock().unwrap();
        let (key, directive) = &seen[0];
        assert_eq!(key, "g-key");
        assert!(directive.contains("role-playing as the AI model named 'Grok'"));
        assert!(directive.contains("---\nBe brief.\n---"));
    }

    #[tokio::test]
    async fn test_proxied_missing_key_names_primary() {
        let primary = Arc::new(RecordingClient::new(Identity::Gemini, Ok("x".into())));
        let strategy = ProxiedGeneration::new(primary, Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::Grok, "xai-key");
        let tuning = TuningSettings::default();

        let err = strategy
            .resolve(&request(Identity::Grok, &creds, &tuning))
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingCredential(Identity::Gemini));
    }

    #[tokio::test]
    async fn test_backend_error_is_extracted() {
        let client = Arc::new(RecordingClient::new(
            Identity::Gemini,
            Err(GenerationError::Http {
                status: 403,
                reason: Some("Forbidden".into()),
                body: r#"{"error":{"message":"API key invalid"}}"#.into(),
            }),
        ));
        let strategy = DirectGeneration::new(client, Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::Gemini, "bad");
        let tuning = TuningSettings::default();

        let err = strategy
            .resolve(&request(Identity::Gemini, &creds, &tuning))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::BackendError {
                message: "API key invalid".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timeout() {
        let strategy = DirectGeneration::new(Arc::new(SlowClient), Duration::from_secs(30));
        let creds = Credentials::new().with(Identity::Gemini, "g-key");
        let tuning = TuningSettings::default();

        let err = strategy
            .resolve(&request(Identity::Gemini, &creds, &tuning))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Timeout {
                identity: Identity::Gemini,
                ceiling: Duration::from_secs(30)
            }
        );
    }

    #[tokio::test]
    async fn test_offline_picks_a_canned_line() {
        let lines = vec!["one".to_string(), "two".to_string()];
        let source = Arc::new(Lines(HashMap::from([(Identity::Grok, lines.clone())])));
        let strategy = OfflineReplies::new(source, OfflineLatency::none());
        let creds = Credentials::new();
        let tuning = TuningSettings::default();

        let reply = strategy
            .resolve(&request(Identity::Grok, &creds, &tuning))
            .await
            .unwrap();
        assert!(lines.contains(&reply));
    }

    #[tokio::test]
    async fn test_offline_without_lines_is_unknown_identity() {
        let source = Arc::new(Lines(HashMap::new()));
        let strategy = OfflineReplies::new(source, OfflineLatency::none());
        let creds = Credentials::new();
        let tuning = TuningSettings::default();

        let err = strategy
            .resolve(&request(Identity::Zai, &creds, &tuning))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }
}

//! Response Resolver
//!
//! Turns an identity, its resolution mode and its projected history into
//! either reply text or a [`ResolveError`]. Each mode is a
//! [`ResolutionStrategy`]; the resolver only looks strategies up in a table
//! keyed by `(identity, mode)`, so backend differences never leak into the
//! scheduler.
//!
//! The primary identity is always resolved under [`ResolutionMode::Direct`],
//! whatever the mode table says.

pub mod error;
pub mod strategy;

pub use error::{ResolveError, extract_backend_message};
pub use strategy::{
    DirectGeneration, OfflineReplies, ProxiedGeneration, ResolutionRequest, ResolutionStrategy,
};

use crate::config::BehaviorConfig;
use crate::error::ForumError;
use crate::ports::generation_client::GenerationClient;
use crate::ports::offline_source::OfflineResponseSource;
use forum_domain::{Identity, ResolutionMode, Rotation};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type StrategyTable = HashMap<(Identity, ResolutionMode), Arc<dyn ResolutionStrategy>>;

/// Strategy lookup table for every identity the forum knows how to resolve
pub struct Resolver {
    primary: Identity,
    strategies: StrategyTable,
}

impl Resolver {
    pub fn builder(primary_client: Arc<dyn GenerationClient>) -> ResolverBuilder {
        ResolverBuilder::new(primary_client)
    }

    pub fn primary(&self) -> Identity {
        self.primary
    }

    /// Mode actually used for `identity` given its configured mode.
    pub fn effective_mode(
        &self,
        identity: Identity,
        configured: Option<ResolutionMode>,
    ) -> ResolutionMode {
        if identity == self.primary {
            ResolutionMode::Direct
        } else {
            configured.unwrap_or_default()
        }
    }

    pub fn supports(&self, identity: Identity, mode: ResolutionMode) -> bool {
        self.strategies.contains_key(&(identity, mode))
    }

    /// Resolve one reply.
    ///
    /// `mode` is the identity's configured mode; `None` means "no mode",
    /// which is how the primary identity is described.
    pub async fn resolve(
        &self,
        request: &ResolutionRequest<'_>,
        mode: Option<ResolutionMode>,
    ) -> Result<String, ResolveError> {
        let identity = request.identity;
        let mode = self.effective_mode(identity, mode);

        let strategy = self
            .strategies
            .get(&(identity, mode))
            .filter(|_| !identity.is_human())
            .ok_or(ResolveError::UnknownIdentity { identity, mode })?;

        debug!("Resolving {} via {} strategy", identity, strategy.mode());
        strategy.resolve(request).await
    }

    /// Fail if some rotation identity cannot be resolved in its default mode.
    pub fn check_rotation(&self, rotation: &Rotation) -> Result<(), ForumError> {
        for identity in rotation.iter() {
            let mode = self.effective_mode(identity, None);
            if !self.supports(identity, mode) {
                return Err(ForumError::UnknownIdentity { identity, mode });
            }
        }
        Ok(())
    }
}

/// Builder for [`Resolver`].
///
/// The primary client is mandatory: it serves the primary identity's direct
/// turns and every proxied turn.
pub struct ResolverBuilder {
    primary_client: Arc<dyn GenerationClient>,
    direct_clients: Vec<Arc<dyn GenerationClient>>,
    offline: Option<Arc<dyn OfflineResponseSource>>,
    behavior: BehaviorConfig,
}

impl ResolverBuilder {
    pub fn new(primary_client: Arc<dyn GenerationClient>) -> Self {
        Self {
            primary_client,
            direct_clients: Vec::new(),
            offline: None,
            behavior: BehaviorConfig::default(),
        }
    }

    /// Register a backend for an identity's `direct` mode.
    pub fn with_direct_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.direct_clients.push(client);
        self
    }

    pub fn with_offline_source(mut self, source: Arc<dyn OfflineResponseSource>) -> Self {
        self.offline = Some(source);
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn build(self) -> Resolver {
        let primary = self.primary_client.identity();
        let timeout = self.behavior.timeout;
        let mut strategies: StrategyTable = HashMap::new();

        strategies.insert(
            (primary, ResolutionMode::Direct),
            Arc::new(DirectGeneration::new(self.primary_client.clone(), timeout)),
        );

        let proxied: Arc<dyn ResolutionStrategy> =
            Arc::new(ProxiedGeneration::new(self.primary_client, timeout));
        let offline = self.offline.map(|source| {
            let strategy: Arc<dyn ResolutionStrategy> = Arc::new(OfflineReplies::new(
                source.clone(),
                self.behavior.offline_latency,
            ));
            (source, strategy)
        });

        for identity in Identity::AI.into_iter().filter(|i| *i != primary) {
            strategies.insert((identity, ResolutionMode::Proxied), proxied.clone());
            match &offline {
                Some((source, strategy)) if source.has_lines(identity) => {
                    strategies.insert((identity, ResolutionMode::Offline), strategy.clone());
                }
                _ => {}
            }
        }

        for client in self.direct_clients {
            let identity = client.identity();
            if identity == primary || identity.is_human() {
                continue;
            }
            strategies.insert(
                (identity, ResolutionMode::Direct),
                Arc::new(DirectGeneration::new(client, timeout)),
            );
        }

        Resolver {
            primary,
            strategies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OfflineLatency;
    use crate::ports::generation_client::{GenerationError, GenerationRequest};
    use async_trait::async_trait;
    use forum_domain::{Credentials, TuningSettings};

    struct EchoClient(Identity);

    #[async_trait]
    impl GenerationClient for EchoClient {
        fn identity(&self) -> Identity {
            self.0
        }

        async fn generate(&self, _: &GenerationRequest<'_>) -> Result<String, GenerationError> {
            Ok(format!("from {}", self.0))
        }
    }

    struct GrokOnly(Vec<String>);

    impl OfflineResponseSource for GrokOnly {
        fn lines(&self, identity: Identity) -> Option<&[String]> {
            (identity == Identity::Grok).then_some(self.0.as_slice())
        }
    }

    fn resolver() -> Resolver {
        Resolver::builder(Arc::new(EchoClient(Identity::Gemini)))
            .with_direct_client(Arc::new(EchoClient(Identity::OpenAi)))
            .with_offline_source(Arc::new(GrokOnly(vec!["canned".into()])))
            .with_behavior(BehaviorConfig::default().with_offline_latency(OfflineLatency::none()))
            .build()
    }

    fn request<'a>(
        identity: Identity,
        credentials: &'a Credentials,
        tuning: &'a TuningSettings,
    ) -> ResolutionRequest<'a> {
        ResolutionRequest {
            identity,
            master_prompt: "prompt",
            history: &[],
            credentials,
            tuning,
        }
    }

    #[tokio::test]
    async fn test_primary_ignores_configured_mode() {
        let resolver = resolver();
        let creds = Credentials::new().with(Identity::Gemini, "g");
        let tuning = TuningSettings::default();

        let reply = resolver
            .resolve(
                &request(Identity::Gemini, &creds, &tuning),
                Some(ResolutionMode::Offline),
            )
            .await
            .unwrap();
        assert_eq!(reply, "from Gemini");
    }

    #[tokio::test]
    async fn test_proxied_goes_through_primary() {
        let resolver = resolver();
        let creds = Credentials::new().with(Identity::Gemini, "g");
        let tuning = TuningSettings::default();

        let reply = resolver
            .resolve(
                &request(Identity::DeepSeek, &creds, &tuning),
                Some(ResolutionMode::Proxied),
            )
            .await
            .unwrap();
        assert_eq!(reply, "from Gemini");
    }

    #[tokio::test]
    async fn test_direct_uses_registered_client() {
        let resolver = resolver();
        let creds = Credentials::new().with(Identity::OpenAi, "sk");
        let tuning = TuningSettings::default();

        let reply = resolver
            .resolve(
                &request(Identity::OpenAi, &creds, &tuning),
                Some(ResolutionMode::Direct),
            )
            .await
            .unwrap();
        assert_eq!(reply, "from OpenAI");
    }

    #[tokio::test]
    async fn test_missing_entry_is_unknown_identity() {
        let resolver = resolver();
        let creds = Credentials::new();
        let tuning = TuningSettings::default();

        let err = resolver
            .resolve(
                &request(Identity::Zai, &creds, &tuning),
                Some(ResolutionMode::Direct),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownIdentity {
                identity: Identity::Zai,
                mode: ResolutionMode::Direct
            }
        );

        let err = resolver
            .resolve(&request(Identity::User, &creds, &tuning), None)
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_check_rotation() {
        let resolver = resolver();
        let ok = Rotation::new(vec![Identity::Grok, Identity::Gemini]).unwrap();
        assert!(resolver.check_rotation(&ok).is_ok());

        let missing = Rotation::new(vec![Identity::Grok, Identity::OpenAi]).unwrap();
        assert_eq!(
            resolver.check_rotation(&missing),
            Err(ForumError::UnknownIdentity {
                identity: Identity::OpenAi,
                mode: ResolutionMode::Offline
            })
        );
    }
}

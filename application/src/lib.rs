//! Application layer for collab-forum
//!
//! This crate contains the turn scheduler, the response resolver, port
//! definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod settings;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, OfflineLatency};
pub use error::ForumError;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    generation_client::{GenerationClient, GenerationError, GenerationRequest},
    offline_source::OfflineResponseSource,
    settings_provider::{SettingsProvider, StaticSettings},
};
pub use resolver::{ResolutionRequest, ResolutionStrategy, ResolveError, Resolver, ResolverBuilder};
pub use settings::InMemorySettings;
pub use use_cases::turn_scheduler::{EMPTY_REPLY, TurnOutcome, TurnScheduler};

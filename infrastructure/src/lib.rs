//! Infrastructure layer for collab-forum
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP generation backends, the canned offline replies,
//! configuration file loading and the JSONL conversation logger.

pub mod config;
pub mod logging;
pub mod offline;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use offline::CannedResponses;
pub use providers::{
    ChatCompletionsClient, GeminiClient, ProviderEndpoint, ProviderKind,
    build_generation_clients, http_client,
};

//! Generation client port
//!
//! Defines the interface for calling one AI backend's text generation API.

use async_trait::async_trait;
use forum_domain::{Identity, ProjectedTurn, TuningSettings};
use thiserror::Error;

/// Errors a generation client can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Http {
        status: u16,
        reason: Option<String>,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("Connection error: {0}")]
    Transport(String),

    /// The backend answered successfully but the body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Everything a backend needs for one generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub credential: &'a str,
    /// Sent as the backend's system-level instruction
    pub system_directive: &'a str,
    /// Already projected for the identity being resolved
    pub history: &'a [ProjectedTurn],
    pub tuning: &'a TuningSettings,
}

/// Client for one generation backend.
///
/// Implementations (adapters) live in the infrastructure layer and map the
/// projected history and tuning knobs onto their provider's request shape.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Identity whose backend this client talks to
    fn identity(&self) -> Identity;

    /// Generate a reply; streaming is never used.
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError>;
}

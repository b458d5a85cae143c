//! Errors surfaced to callers of the forum use cases

use forum_domain::{DomainError, Identity, ResolutionMode};
use thiserror::Error;

/// Errors reported synchronously by the turn scheduler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForumError {
    /// Bad input such as an empty topic; no state was changed.
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// The rotation names an identity no strategy can resolve.
    #[error("No resolution strategy for {identity} in {mode} mode")]
    UnknownIdentity {
        identity: Identity,
        mode: ResolutionMode,
    },
}

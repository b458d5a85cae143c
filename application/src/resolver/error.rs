//! Resolution errors and backend message extraction

use crate::ports::generation_client::GenerationError;
use forum_domain::{Identity, ResolutionMode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a turn's reply could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{0} API key not provided")]
    MissingCredential(Identity),

    #[error("{identity} did not respond within {ceiling:?}")]
    Timeout { identity: Identity, ceiling: Duration },

    #[error("{message}")]
    BackendError { message: String },

    /// No strategy is registered for this identity and mode.
    #[error("No resolution strategy for {identity} in {mode} mode")]
    UnknownIdentity {
        identity: Identity,
        mode: ResolutionMode,
    },
}

impl ResolveError {
    /// A configuration defect rather than a per-turn failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ResolveError::UnknownIdentity { .. })
    }
}

impl From<GenerationError> for ResolveError {
    fn from(err: GenerationError) -> Self {
        let message = match err {
            GenerationError::Http {
                status,
                reason,
                body,
            } => extract_backend_message(status, reason.as_deref(), &body),
            GenerationError::Transport(msg) => format!("Connection error: {}", msg),
            GenerationError::InvalidResponse(msg) => format!("Invalid response: {}", msg),
        };
        ResolveError::BackendError { message }
    }
}

/// Pick the most descriptive message out of a failed backend response.
///
/// Tried in order: `error.message`, a string `error`, a top-level `message`,
/// the raw body, then the status line.
pub fn extract_backend_message(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidate = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| json.get("error").and_then(Value::as_str))
            .or_else(|| json.get("message").and_then(Value::as_str));
        if let Some(msg) = candidate.map(str::trim).filter(|m| !m.is_empty()) {
            return msg.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    match reason {
        Some(reason) if !reason.is_empty() => format!("HTTP {} {}", status, reason),
        _ => format!("HTTP {}", status),
    }
}

//! Domain error types

use crate::core::identity::Identity;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    #[error("Unknown resolution mode: {0}")]
    UnknownMode(String),

    #[error("Rotation must contain at least one AI identity")]
    EmptyRotation,

    #[error("The human participant cannot take a turn in the rotation")]
    HumanInRotation,

    #[error("{0} appears more than once in the rotation")]
    DuplicateInRotation(Identity),

    #[error("{0} is the primary identity and has no resolution mode")]
    PrimaryHasNoMode(Identity),
}

impl DomainError {
    /// Check if this error came from validating user input (as opposed to configuration)
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::EmptyTopic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_topic_display() {
        assert_eq!(DomainError::EmptyTopic.to_string(), "Topic cannot be empty");
    }

    #[test]
    fn test_is_validation_check() {
        assert!(DomainError::EmptyTopic.is_validation());
        assert!(!DomainError::EmptyRotation.is_validation());
        assert!(!DomainError::UnknownIdentity("x".to_string()).is_validation());
    }

    #[test]
    fn test_duplicate_display_uses_name() {
        let err = DomainError::DuplicateInRotation(Identity::Zai);
        assert_eq!(err.to_string(), "Z.ai appears more than once in the rotation");
    }
}

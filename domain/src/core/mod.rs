//! Core domain concepts shared across all subdomains.
//!
//! - [`identity::Identity`]: forum participants (the human and each AI backend)
//! - [`topic::Topic`]: a validated discussion topic
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod identity;
pub mod topic;

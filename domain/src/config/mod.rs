//! Configuration value objects for the domain layer
//!
//! Shared by the infrastructure config loader and the CLI that reports issues.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

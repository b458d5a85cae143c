//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters and the host
//! application must implement.

pub mod conversation_logger;
pub mod generation_client;
pub mod offline_source;
pub mod settings_provider;

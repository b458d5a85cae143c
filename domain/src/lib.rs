//! Domain layer for collab-forum
//!
//! This crate contains the core entities and value objects of a round-robin
//! forum in which several AI backends discuss one human-supplied topic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Identity**: a fixed participant, the human or one AI backend
//! - **Rotation**: the cyclic order in which AI identities take turns
//! - **Projection**: the shared log reshaped so one backend sees itself as
//!   the model and everyone else as user input
//! - **Resolution mode**: how an identity's reply is obtained
//!   (offline / proxied / direct)

pub mod config;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod settings;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use conversation::{
    message::{Message, MessageId},
    projection::{ProjectedRole, ProjectedTurn, attribute, project_history},
    store::{ChatSession, ChatSnapshot, ConversationStore},
    transcript::render_transcript,
};
pub use core::{error::DomainError, identity::Identity, topic::Topic};
pub use prompt::PromptTemplate;
pub use settings::{
    ForumSettings,
    credentials::Credentials,
    mode::{ModeTable, ResolutionMode},
    rotation::Rotation,
    tuning::{MAX_RESPONSE_DELAY_SECONDS, TuningSettings},
};

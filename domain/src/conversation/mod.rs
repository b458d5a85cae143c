//! Conversation domain.
//!
//! - [`message::Message`]: a single transcript entry
//! - [`store::ConversationStore`]: the message log plus session state
//! - [`projection::project_history`]: the log as seen by one backend
//! - [`transcript::render_transcript`]: plain-text export

pub mod message;
pub mod projection;
pub mod store;
pub mod transcript;

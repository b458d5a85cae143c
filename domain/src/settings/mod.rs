//! Forum settings value objects.
//!
//! - [`rotation::Rotation`]: the fixed turn order over AI identities
//! - [`mode::ResolutionMode`] / [`mode::ModeTable`]: how each identity's reply is obtained
//! - [`tuning::TuningSettings`]: generation knobs and turn pacing
//! - [`credentials::Credentials`]: opaque per-identity API keys

pub mod credentials;
pub mod mode;
pub mod rotation;
pub mod tuning;

use crate::prompt::PromptTemplate;
use credentials::Credentials;
use mode::ModeTable;
use tuning::TuningSettings;

/// Point-in-time view of everything a turn needs from the host's settings.
#[derive(Debug, Clone)]
pub struct ForumSettings {
    pub master_prompt: String,
    pub tuning: TuningSettings,
    pub modes: ModeTable,
    pub credentials: Credentials,
}

impl Default for ForumSettings {
    fn default() -> Self {
        Self {
            master_prompt: PromptTemplate::default_master_prompt().to_string(),
            tuning: TuningSettings::default(),
            modes: ModeTable::default(),
            credentials: Credentials::default(),
        }
    }
}

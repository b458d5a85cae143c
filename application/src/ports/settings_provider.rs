//! Settings provider port
//!
//! The forum core never stores or transports settings; it asks the host for a
//! fresh [`ForumSettings`] at the start of every turn.

use forum_domain::ForumSettings;

/// Source of master prompt, tuning, modes and credentials
pub trait SettingsProvider: Send + Sync {
    /// Current settings, read once per turn
    fn current(&self) -> ForumSettings;
}

/// Settings fixed at construction time
pub struct StaticSettings(pub ForumSettings);

impl SettingsProvider for StaticSettings {
    fn current(&self) -> ForumSettings {
        self.0.clone()
    }
}

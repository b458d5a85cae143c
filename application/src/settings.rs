//! In-memory settings provider
//!
//! Backs the [`SettingsProvider`] port with a lock-guarded [`ForumSettings`]
//! the host can edit while a session is running. Edits take effect at the
//! next turn.

use crate::ports::settings_provider::SettingsProvider;
use forum_domain::{DomainError, ForumSettings, Identity, ResolutionMode, TuningSettings};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct InMemorySettings {
    inner: RwLock<ForumSettings>,
}

impl InMemorySettings {
    pub fn new(settings: ForumSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ForumSettings> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ForumSettings> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_master_prompt(&self, prompt: impl Into<String>) {
        self.write().master_prompt = prompt.into();
    }

    pub fn set_tuning(&self, tuning: TuningSettings) {
        self.write().tuning = tuning;
    }

    /// Seconds between turns; applies from the next wait.
    pub fn set_response_delay(&self, seconds: f64) {
        self.write().tuning.response_delay_seconds = seconds;
    }

    /// Rejected for the primary identity, which has no mode.
    pub fn set_mode(&self, identity: Identity, mode: ResolutionMode) -> Result<(), DomainError> {
        self.write().modes.set(identity, mode)
    }

    /// A blank key removes the credential.
    pub fn set_credential(&self, identity: Identity, key: impl Into<String>) {
        self.write().credentials.insert(identity, key);
    }

    pub fn mode_for(&self, identity: Identity) -> Option<ResolutionMode> {
        self.read().modes.mode_for(identity)
    }
}

impl SettingsProvider for InMemorySettings {
    fn current(&self) -> ForumSettings {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_visible_in_next_read() {
        let settings = InMemorySettings::default();
        settings.set_master_prompt("Debate politely.");
        settings.set_response_delay(0.25);
        settings.set_credential(Identity::Grok, "xai-key");
        settings.set_mode(Identity::Grok, ResolutionMode::Direct).unwrap();

        let current = settings.current();
        assert_eq!(current.master_prompt, "Debate politely.");
        assert_eq!(current.tuning.response_delay_seconds, 0.25);
        assert_eq!(current.credentials.get(Identity::Grok), Some("xai-key"));
        assert_eq!(
            current.modes.mode_for(Identity::Grok),
            Some(ResolutionMode::Direct)
        );
    }

    #[test]
    fn test_primary_mode_rejected() {
        let settings = InMemorySettings::default();
        let err = settings
            .set_mode(Identity::Gemini, ResolutionMode::Offline)
            .unwrap_err();
        assert_eq!(err, DomainError::PrimaryHasNoMode(Identity::Gemini));
        assert_eq!(settings.mode_for(Identity::Gemini), None);
    }
}

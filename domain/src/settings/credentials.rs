//! Per-identity API credentials

use crate::core::identity::Identity;
use std::collections::HashMap;

/// Mapping from identity to its secret key.
///
/// Opaque to the forum core: keys are only handed to generation clients.
/// Empty strings are treated as absent, never substituted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    keys: HashMap<Identity, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: Identity, key: impl Into<String>) {
        let key = key.into();
        if key.trim().is_empty() {
            self.keys.remove(&identity);
        } else {
            self.keys.insert(identity, key);
        }
    }

    pub fn with(mut self, identity: Identity, key: impl Into<String>) -> Self {
        self.insert(identity, key);
        self
    }

    pub fn get(&self, identity: Identity) -> Option<&str> {
        self.keys.get(&identity).map(String::as_str)
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.keys.contains_key(&identity)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut present: Vec<_> = self.keys.keys().map(Identity::key).collect();
        present.sort_unstable();
        f.debug_struct("Credentials")
            .field("present", &present)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_absent() {
        let creds = Credentials::new()
            .with(Identity::Gemini, "   ")
            .with(Identity::OpenAi, "sk-test");
        assert!(!creds.contains(Identity::Gemini));
        assert_eq!(creds.get(Identity::OpenAi), Some("sk-test"));
    }

    #[test]
    fn test_blank_key_clears_previous() {
        let mut creds = Credentials::new().with(Identity::Grok, "xai-1");
        creds.insert(Identity::Grok, "");
        assert_eq!(creds.get(Identity::Grok), None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new().with(Identity::Gemini, "super-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("gemini"));
        assert!(!printed.contains("super-secret"));
    }
}

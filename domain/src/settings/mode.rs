//! Resolution mode value objects

use crate::core::error::DomainError;
use crate::core::identity::Identity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strategy used to obtain an identity's reply.
///
/// The primary identity has no mode: it is always resolved by direct
/// generation against its own backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Canned lines, no network, no credential
    #[default]
    Offline,
    /// The primary backend role-plays this identity
    Proxied,
    /// The identity's own backend, with its own credential
    Direct,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Offline => "offline",
            ResolutionMode::Proxied => "proxied",
            ResolutionMode::Direct => "direct",
        }
    }
}

impl std::fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResolutionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "mock", "simulated" and "live" are the names older settings files used
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" | "mock" => Ok(ResolutionMode::Offline),
            "proxied" | "simulated" => Ok(ResolutionMode::Proxied),
            "direct" | "live" => Ok(ResolutionMode::Direct),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

/// Per-identity resolution modes for every non-primary identity.
///
/// Identities without an explicit entry resolve [`ResolutionMode::Offline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTable {
    primary: Identity,
    modes: BTreeMap<Identity, ResolutionMode>,
}

impl ModeTable {
    pub fn new(primary: Identity) -> Self {
        Self {
            primary,
            modes: BTreeMap::new(),
        }
    }

    pub fn primary(&self) -> Identity {
        self.primary
    }

    /// Set the mode for a non-primary identity.
    pub fn set(&mut self, identity: Identity, mode: ResolutionMode) -> Result<(), DomainError> {
        if identity == self.primary {
            return Err(DomainError::PrimaryHasNoMode(identity));
        }
        if identity.is_human() {
            return Err(DomainError::UnknownIdentity(identity.key().to_string()));
        }
        self.modes.insert(identity, mode);
        Ok(())
    }

    /// Builder-style [`ModeTable::set`]
    pub fn with(mut self, identity: Identity, mode: ResolutionMode) -> Result<Self, DomainError> {
        self.set(identity, mode)?;
        Ok(self)
    }

    /// Configured mode, or `None` for the primary identity.
    pub fn mode_for(&self, identity: Identity) -> Option<ResolutionMode> {
        if identity == self.primary {
            None
        } else {
            Some(self.modes.get(&identity).copied().unwrap_or_default())
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::new(Identity::default_primary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_offline() {
        let table = ModeTable::default();
        assert_eq!(table.mode_for(Identity::Grok), Some(ResolutionMode::Offline));
        assert_eq!(table.mode_for(Identity::Zai), Some(ResolutionMode::Offline));
    }

    #[test]
    fn test_primary_has_no_mode() {
        let mut table = ModeTable::default();
        assert_eq!(table.mode_for(Identity::Gemini), None);
        assert_eq!(
            table.set(Identity::Gemini, ResolutionMode::Direct),
            Err(DomainError::PrimaryHasNoMode(Identity::Gemini))
        );
    }

    #[test]
    fn test_set_mode() {
        let table = ModeTable::default()
            .with(Identity::OpenAi, ResolutionMode::Direct)
            .unwrap();
        assert_eq!(table.mode_for(Identity::OpenAi), Some(ResolutionMode::Direct));
        assert_eq!(table.mode_for(Identity::Grok), Some(ResolutionMode::Offline));
    }

    #[test]
    fn test_parse_legacy_names() {
        assert_eq!("mock".parse::<ResolutionMode>().unwrap(), ResolutionMode::Offline);
        assert_eq!("simulated".parse::<ResolutionMode>().unwrap(), ResolutionMode::Proxied);
        assert_eq!("LIVE".parse::<ResolutionMode>().unwrap(), ResolutionMode::Direct);
        assert!("remote".parse::<ResolutionMode>().is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&ResolutionMode::Proxied).unwrap();
        assert_eq!(json, "\"proxied\"");
    }
}

//! Identity value object representing a forum participant

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Participants of a forum discussion (Value Object)
///
/// The set is closed: one human participant and a fixed group of AI
/// backends. The display name doubles as the attribution tag used when
/// one backend sees another backend's reply (`[Grok]: ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// The human who supplied the topic
    User,
    Grok,
    Gemini,
    OpenAi,
    DeepSeek,
    Zai,
}

impl Identity {
    /// Every AI identity, in default rotation order
    pub const AI: [Identity; 5] = [
        Identity::Grok,
        Identity::Gemini,
        Identity::OpenAi,
        Identity::DeepSeek,
        Identity::Zai,
    ];

    /// Stable configuration key (`grok`, `openai`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Identity::User => "user",
            Identity::Grok => "grok",
            Identity::Gemini => "gemini",
            Identity::OpenAi => "openai",
            Identity::DeepSeek => "deepseek",
            Identity::Zai => "zai",
        }
    }

    /// Human-readable name, also used as attribution tag
    pub fn display_name(&self) -> &'static str {
        match self {
            Identity::User => "User",
            Identity::Grok => "Grok",
            Identity::Gemini => "Gemini",
            Identity::OpenAi => "OpenAI",
            Identity::DeepSeek => "DeepSeek",
            Identity::Zai => "Z.ai",
        }
    }

    /// Check if this is the human participant
    pub fn is_human(&self) -> bool {
        matches!(self, Identity::User)
    }

    /// The identity able to role-play the others when no key is available for them
    pub fn default_primary() -> Identity {
        Identity::Gemini
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Identity {
    type Err = DomainError;

    /// Accepts both configuration keys and display names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "human" => Ok(Identity::User),
            "grok" => Ok(Identity::Grok),
            "gemini" => Ok(Identity::Gemini),
            "openai" => Ok(Identity::OpenAi),
            "deepseek" => Ok(Identity::DeepSeek),
            "zai" | "z.ai" => Ok(Identity::Zai),
            other => Err(DomainError::UnknownIdentity(other.to_string())),
        }
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

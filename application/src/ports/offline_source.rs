//! Offline response source port

use forum_domain::Identity;

/// Table of canned lines used by offline resolution.
pub trait OfflineResponseSource: Send + Sync {
    /// Canned lines for `identity`; `None` or empty means the identity has no offline persona.
    fn lines(&self, identity: Identity) -> Option<&[String]>;

    fn has_lines(&self, identity: Identity) -> bool {
        self.lines(identity).is_some_and(|lines| !lines.is_empty())
    }
}

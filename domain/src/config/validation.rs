//! Configuration issues reported by settings validation.
//!
//! Validation never fails fast: it collects every issue with a severity so
//! the caller can print warnings and abort only on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the forum cannot start with this configuration.
    Error,
    /// Non-fatal: the forum starts but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A key that should name a participant does not.
    UnknownIdentity { field: String, value: String },
    /// A string field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// The rotation is empty, repeats an identity or includes the human.
    InvalidRotation,
    /// A numeric tuning knob is outside the range backends accept.
    OutOfRange { field: String },
    /// A mode needs a credential that is not configured.
    MissingCredential { identity: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether any issue in `issues` is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_returns_true_for_errors() {
        let issues = vec![
            ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "tuning.top_p".to_string(),
                },
                "too high",
            ),
            ConfigIssue::error(ConfigIssueCode::InvalidRotation, "empty"),
        ];
        assert!(ConfigIssue::has_errors(&issues));
    }

    #[test]
    fn has_errors_returns_false_for_warnings_only() {
        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::MissingCredential {
                identity: "openai".to_string(),
            },
            "no key",
        )];
        assert!(!ConfigIssue::has_errors(&issues));
    }

    #[test]
    fn has_errors_returns_false_for_empty() {
        assert!(!ConfigIssue::has_errors(&[]));
    }
}

//! Resolver behavior from TOML (`[behavior]` section)

use forum_application::{BehaviorConfig, OfflineLatency};
use forum_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// ```toml
/// [behavior]
/// timeout_seconds = 30
/// offline_latency_ms = [500, 2000]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Ceiling for one generation call
    pub timeout_seconds: u64,
    /// Simulated thinking time of offline replies, `[min, max]`
    pub offline_latency_ms: [u64; 2],
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            offline_latency_ms: [500, 2000],
        }
    }
}

impl FileBehaviorConfig {
    pub fn to_behavior(&self) -> (BehaviorConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut timeout_seconds = self.timeout_seconds;
        if timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "behavior.timeout_seconds".to_string(),
                },
                "behavior.timeout_seconds: must be at least 1",
            ));
            timeout_seconds = Self::default().timeout_seconds;
        }

        let [min, max] = self.offline_latency_ms;
        let behavior = BehaviorConfig::with_timeout_seconds(timeout_seconds)
            .with_offline_latency(OfflineLatency::from_millis(min, max));
        (behavior, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_to_behavior() {
        let config: FileBehaviorConfig = toml::from_str(
            r#"
timeout_seconds = 10
offline_latency_ms = [0, 50]
"#,
        )
        .unwrap();
        let (behavior, issues) = config.to_behavior();
        assert!(issues.is_empty());
        assert_eq!(behavior.timeout, Duration::from_secs(10));
        assert_eq!(behavior.offline_latency.max, Duration::from_millis(50));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FileBehaviorConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let (behavior, issues) = config.to_behavior();
        assert_eq!(issues.len(), 1);
        assert_eq!(behavior.timeout, Duration::from_secs(30));
    }
}

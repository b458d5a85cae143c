//! Generation tuning from TOML (`[tuning]` section)

use forum_domain::{ConfigIssue, ConfigIssueCode, MAX_RESPONSE_DELAY_SECONDS, TuningSettings};
use serde::{Deserialize, Serialize};

/// Raw tuning knobs; missing fields take the built-in defaults.
///
/// ```toml
/// [tuning]
/// temperature = 0.7
/// top_k = 40
/// top_p = 0.9
/// max_output_tokens = 512
/// response_delay_seconds = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTuningConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_delay_seconds: f64,
}

impl Default for FileTuningConfig {
    fn default() -> Self {
        let defaults = TuningSettings::default();
        Self {
            temperature: defaults.temperature,
            top_k: defaults.top_k,
            top_p: defaults.top_p,
            max_output_tokens: defaults.max_output_tokens,
            response_delay_seconds: defaults.response_delay_seconds,
        }
    }
}

impl FileTuningConfig {
    pub fn to_tuning(&self) -> (TuningSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(out_of_range("temperature", "must be between 0 and 2"));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            issues.push(out_of_range("top_p", "must be in (0, 1]"));
        }
        if self.top_k == 0 {
            issues.push(out_of_range("top_k", "must be at least 1"));
        }
        if self.max_output_tokens == 0 {
            issues.push(out_of_range("max_output_tokens", "must be at least 1"));
        }
        if !(self.response_delay_seconds >= 0.0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "tuning.response_delay_seconds".to_string(),
                },
                "tuning.response_delay_seconds: negative delay, turns will not pause",
            ));
        } else if self.response_delay_seconds > MAX_RESPONSE_DELAY_SECONDS {
            issues.push(out_of_range(
                "response_delay_seconds",
                &format!("must be at most {} seconds", MAX_RESPONSE_DELAY_SECONDS),
            ));
        }

        let tuning = TuningSettings {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
            response_delay_seconds: self.response_delay_seconds,
        };
        (tuning, issues)
    }
}

fn out_of_range(field: &str, constraint: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: format!("tuning.{}", field),
        },
        format!("tuning.{}: {}", field, constraint),
    )
}

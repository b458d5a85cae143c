//! Generation tuning knobs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted pause between two turns.
pub const MAX_RESPONSE_DELAY_SECONDS: f64 = 3600.0;

/// Numeric knobs passed opaquely to generation backends.
///
/// `response_delay_seconds` is the only field the scheduler reads itself:
/// it paces the gap between two turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningSettings {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_delay_seconds: f64,
}

impl TuningSettings {
    /// Pause between two turns. Negative or non-finite values mean no pause;
    /// larger values are capped at [`MAX_RESPONSE_DELAY_SECONDS`].
    pub fn response_delay(&self) -> Duration {
        let secs = self.response_delay_seconds;
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs.min(MAX_RESPONSE_DELAY_SECONDS))
        } else {
            Duration::ZERO
        }
    }

    pub fn with_response_delay(mut self, seconds: f64) -> Self {
        self.response_delay_seconds = seconds;
        self
    }
}

impl Default for TuningSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.9,
            max_output_tokens: 512,
            response_delay_seconds: 1.0,
        }
    }
}

//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the generation timeout ceiling and simulated offline latency.

use rand::Rng;
use std::time::Duration;

/// Ceiling applied to generation calls when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Application behavior configuration.
///
/// Controls runtime behavior of the resolver: how long a generation call may
/// take before it is reported as a timeout, and how long offline replies
/// pretend to think.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a generation backend.
    pub timeout: Duration,
    /// Simulated latency of offline replies.
    pub offline_latency: OfflineLatency,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(seconds),
            ..Self::default()
        }
    }

    pub fn with_offline_latency(mut self, latency: OfflineLatency) -> Self {
        self.offline_latency = latency;
        self
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            offline_latency: OfflineLatency::default(),
        }
    }
}

/// Bounds of the randomized delay before an offline reply is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfflineLatency {
    pub min: Duration,
    pub max: Duration,
}

impl OfflineLatency {
    /// Build from millisecond bounds; swapped bounds are reordered.
    pub fn from_millis(min: u64, max: u64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    /// Reply immediately.
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    /// Draw a delay uniformly from `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for OfflineLatency {
    /// 0.5s to 2s
    fn default() -> Self {
        Self::from_millis(500, 2000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_thirty_seconds() {
        assert_eq!(BehaviorConfig::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_sample_within_bounds() {
        let latency = OfflineLatency::from_millis(10, 20);
        for _ in 0..50 {
            let d = latency.sample();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn test_swapped_bounds_reordered() {
        let latency = OfflineLatency::from_millis(900, 100);
        assert_eq!(latency.min, Duration::from_millis(100));
        assert_eq!(latency.max, Duration::from_millis(900));
    }

    #[test]
    fn test_none_is_zero() {
        assert_eq!(OfflineLatency::none().sample(), Duration::ZERO);
    }
}

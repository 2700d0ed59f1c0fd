//! Simulated latency settings for the mock backend

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays applied by the mock backend before each outward call resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub suggestions_ms: u64,
    pub availability_ms: u64,
    pub packages_ms: u64,
    pub lead_ms: u64,
    /// Reverse lookup after a position fix
    pub reverse_geocode_ms: u64,
    /// Upper bound on the whole geolocation lookup
    pub geolocation_timeout_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            suggestions_ms: 300,
            availability_ms: 1200,
            packages_ms: 200,
            lead_ms: 1000,
            reverse_geocode_ms: 1500,
            geolocation_timeout_ms: 10_000,
        }
    }
}

impl LatencyConfig {
    /// Zero simulated delay; the geolocation timeout is kept.
    pub fn none() -> Self {
        Self {
            suggestions_ms: 0,
            availability_ms: 0,
            packages_ms: 0,
            lead_ms: 0,
            reverse_geocode_ms: 0,
            ..Self::default()
        }
    }

    pub fn suggestions(&self) -> Duration {
        Duration::from_millis(self.suggestions_ms)
    }

    pub fn availability(&self) -> Duration {
        Duration::from_millis(self.availability_ms)
    }

    pub fn packages(&self) -> Duration {
        Duration::from_millis(self.packages_ms)
    }

    pub fn lead(&self) -> Duration {
        Duration::from_millis(self.lead_ms)
    }

    pub fn reverse_geocode(&self) -> Duration {
        Duration::from_millis(self.reverse_geocode_ms)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_millis(self.geolocation_timeout_ms)
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LatencyConfig::default();
        assert_eq!(config.availability(), Duration::from_millis(1200));
        assert_eq!(config.geolocation_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_none_keeps_timeout() {
        let config = LatencyConfig::none();
        assert!(config.lead().is_zero());
        assert_eq!(config.geolocation_timeout(), Duration::from_secs(10));
    }
}

//! "Use my location" lookup
//!
//! Failures here never block manual address entry; the caller shows the
//! message and leaves the input as it was.

use crate::config::{simulate, LatencyConfig};
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub const LOCATION_UNAVAILABLE: &str = "Unable to retrieve your location. Please enter manually.";

/// Address the mock reverse lookup resolves every position to
pub const MOCK_LOCATED_ADDRESS: &str = "15 Fibre Way, Sandton, Johannesburg";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Current position fix; denial and hardware errors surface as
    /// `CoreError::Geolocation`.
    async fn current_position(&self) -> CoreResult<Coordinates>;

    async fn reverse_geocode(&self, position: Coordinates) -> CoreResult<String>;
}

/// Resolve the device position to a free-text address. The position fix is
/// bounded by `latency.geolocation_timeout()`.
pub async fn locate_address(geolocator: &dyn Geolocator, latency: &LatencyConfig) -> CoreResult<String> {
    let limit = latency.geolocation_timeout();
    let position = match tokio::time::timeout(limit, geolocator.current_position()).await {
        Ok(Ok(position)) => position,
        Ok(Err(e)) => {
            warn!("Geolocation failed: {}", e);
            return Err(CoreError::Geolocation(LOCATION_UNAVAILABLE.to_string()));
        }
        Err(_) => {
            warn!("Geolocation timed out after {:?}", limit);
            return Err(CoreError::Geolocation(LOCATION_UNAVAILABLE.to_string()));
        }
    };

    let address = match geolocator.reverse_geocode(position).await {
        Ok(address) => address,
        Err(e) => {
            warn!("Reverse lookup failed: {}", e);
            return Err(CoreError::Geolocation(LOCATION_UNAVAILABLE.to_string()));
        }
    };
    info!("Located device at {}", address);
    Ok(address)
}

/// Fixed position, or a denial, with the reverse lookup on a timer
pub struct MockGeolocator {
    position: Option<Coordinates>,
    fix_delay: Duration,
    reverse_delay: Duration,
}

impl MockGeolocator {
    pub fn at(position: Coordinates, latency: &LatencyConfig) -> Self {
        Self {
            position: Some(position),
            fix_delay: Duration::ZERO,
            reverse_delay: latency.reverse_geocode(),
        }
    }

    /// Sandton, Johannesburg
    pub fn sandton(latency: &LatencyConfig) -> Self {
        Self::at(
            Coordinates {
                latitude: -26.1076,
                longitude: 28.0567,
            },
            latency,
        )
    }

    /// The user refused the permission prompt
    pub fn denied() -> Self {
        Self {
            position: None,
            fix_delay: Duration::ZERO,
            reverse_delay: Duration::ZERO,
        }
    }

    /// Delay the position fix, e.g. to exercise the timeout
    pub fn with_fix_delay(mut self, delay: Duration) -> Self {
        self.fix_delay = delay;
        self
    }
}

#[async_trait]
impl Geolocator for MockGeolocator {
    async fn current_position(&self) -> CoreResult<Coordinates> {
        simulate(self.fix_delay).await;
        self.position
            .ok_or_else(|| CoreError::Geolocation("permission denied".to_string()))
    }

    async fn reverse_geocode(&self, _position: Coordinates) -> CoreResult<String> {
        simulate(self.reverse_delay).await;
        Ok(MOCK_LOCATED_ADDRESS.to_string())
    }
}

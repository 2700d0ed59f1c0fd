//! Address coverage resolution
//!
//! The simulated resolver applies a placeholder decision table driven by a
//! single uniform sample. It is a stand-in for per-network coverage APIs,
//! so callers only ever see it through [`AvailabilityProvider`].

use crate::address::Address;
use crate::config::simulate;
use crate::CoreResult;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const FROGFOOT: &str = "frogfoot";
pub const OPENSERVE: &str = "openserve";
pub const VUMATEL: &str = "vumatel";

pub const FROGFOOT_EXCHANGE: &str = "Claremont Node A";
pub const OPENSERVE_EXCHANGE: &str = "Umhlanga Exchange";

/// Outcome of one coverage check; held until the next check replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    /// Provider ids, de-duplicated, in the order the rules matched
    pub providers: Vec<String>,
}

impl AvailabilityResult {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            exchange: None,
            providers: Vec::new(),
        }
    }

    pub fn covers(&self, provider_id: &str) -> bool {
        self.providers.iter().any(|p| p == provider_id)
    }

    /// `available` holds exactly when at least one provider was found.
    pub fn is_consistent(&self) -> bool {
        self.available == !self.providers.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Apply the coverage decision table to `address` for the uniform sample
/// `sample` in `[0, 1)`.
///
/// Rules run in order and later rules win: the frogfoot rule, then the
/// openserve rule (which overwrites the exchange), then the no-coverage
/// override for `sample < 0.1`, which clears whatever the first two found.
pub fn resolve_coverage(address: &Address, sample: f64) -> AvailabilityResult {
    let city = normalize(&address.city);
    let mut providers: Vec<String> = Vec::new();
    let mut available = false;
    let mut exchange = None;

    if city.contains("capetown") || sample > 0.6 {
        providers.push(FROGFOOT.to_string());
        available = true;
        exchange = Some(FROGFOOT_EXCHANGE.to_string());
    }

    if city.contains("durban") || (sample > 0.4 && sample < 0.8) {
        providers.push(OPENSERVE.to_string());
        available = true;
        exchange = Some(OPENSERVE_EXCHANGE.to_string());
    }

    if sample < 0.1 {
        providers.clear();
        available = false;
        exchange = None;
    }

    if available && providers.is_empty() {
        providers.push(VUMATEL.to_string());
    }

    let mut seen = Vec::with_capacity(providers.len());
    providers.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(p.clone());
            true
        }
    });

    AvailabilityResult {
        available: !providers.is_empty(),
        exchange,
        providers,
    }
}

/// Source of the uniform sample fed to the decision table
pub trait SampleSource: Send + Sync {
    fn sample(&self) -> f64;
}

pub struct ThreadRngSource;

impl SampleSource for ThreadRngSource {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always yields the same sample
pub struct FixedSample(pub f64);

impl SampleSource for FixedSample {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Capability that decides coverage for an address
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn check(&self, address: &Address) -> CoreResult<AvailabilityResult>;
}

/// Randomised decision table behind a fixed delay
pub struct SimulatedAvailability {
    source: Box<dyn SampleSource>,
    delay: Duration,
}

impl SimulatedAvailability {
    pub fn new(delay: Duration) -> Self {
        Self::with_source(Box::new(ThreadRngSource), delay)
    }

    pub fn with_source(source: Box<dyn SampleSource>, delay: Duration) -> Self {
        Self { source, delay }
    }
}

#[async_trait]
impl AvailabilityProvider for SimulatedAvailability {
    async fn check(&self, address: &Address) -> CoreResult<AvailabilityResult> {
        simulate(self.delay).await;
        let sample = self.source.sample();
        let result = resolve_coverage(address, sample);
        debug!(
            "Coverage for {}: sample={:.3} providers={:?}",
            address, sample, result.providers
        );
        Ok(result)
    }
}

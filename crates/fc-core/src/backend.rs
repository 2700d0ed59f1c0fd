//! Outward backend contract
//!
//! The four calls the site makes to the outside world. [`MockBackend`]
//! answers them from the compiled-in catalog after a simulated delay.

use crate::address::Address;
use crate::availability::{AvailabilityProvider, AvailabilityResult, SimulatedAvailability};
use crate::catalog::{Catalog, Package};
use crate::config::{simulate, LatencyConfig};
use crate::lead::Lead;
use crate::CoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Queries shorter than this get no suggestions
pub const MIN_QUERY_LEN: usize = 3;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Ordered suggestions for a partially typed address
    async fn address_suggestions(&self, query: &str) -> CoreResult<Vec<String>>;

    async fn check_availability(&self, address: &Address) -> CoreResult<AvailabilityResult>;

    /// The full package catalog
    async fn packages(&self) -> CoreResult<Vec<Package>>;

    /// Returns the backend's acknowledgement. Invalid leads fail with a
    /// validation error, delivery problems with a transport error.
    async fn submit_lead(&self, lead: &Lead) -> CoreResult<bool>;
}

/// Suggestions templated from the query
pub fn suggestions_for(query: &str) -> Vec<String> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    vec![
        format!("{} Street, Sandton, Johannesburg", query),
        format!("{} Avenue, Cape Town City Centre", query),
        format!("{} Close, Umhlanga, Durban", query),
        format!("{} Road, Brooklyn, Pretoria", query),
        format!("12 {} Way, Midrand", query),
    ]
}

/// A lead as the mock backend received it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLead {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub lead: Lead,
}

pub struct MockBackend {
    catalog: Catalog,
    availability: Box<dyn AvailabilityProvider>,
    latency: LatencyConfig,
    submitted: Mutex<Vec<SubmittedLead>>,
}

impl MockBackend {
    pub fn new(latency: LatencyConfig) -> Self {
        let availability = SimulatedAvailability::new(latency.availability());
        Self::with_availability(latency, Box::new(availability))
    }

    /// Use a specific coverage decision instead of the randomised one.
    pub fn with_availability(
        latency: LatencyConfig,
        availability: Box<dyn AvailabilityProvider>,
    ) -> Self {
        Self {
            catalog: Catalog::builtin(),
            availability,
            latency,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn latency(&self) -> &LatencyConfig {
        &self.latency
    }

    /// Leads accepted so far, oldest first
    pub async fn submitted(&self) -> Vec<SubmittedLead> {
        self.submitted.lock().await.clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn address_suggestions(&self, query: &str) -> CoreResult<Vec<String>> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        simulate(self.latency.suggestions()).await;
        Ok(suggestions_for(query))
    }

    async fn check_availability(&self, address: &Address) -> CoreResult<AvailabilityResult> {
        info!("Checking availability for {}", address);
        self.availability.check(address).await
    }

    async fn packages(&self) -> CoreResult<Vec<Package>> {
        simulate(self.latency.packages()).await;
        Ok(self.catalog.packages().to_vec())
    }

    async fn submit_lead(&self, lead: &Lead) -> CoreResult<bool> {
        lead.validate()?;
        info!("Lead submitted to backend: {} for {}", lead.name, lead.package_id);
        simulate(self.latency.lead()).await;

        let record = SubmittedLead {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            lead: lead.clone(),
        };
        debug!("Recorded lead {}", record.id);
        self.submitted.lock().await.push(record);
        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::availability::FixedSample;
    use crate::{CoreError, FormField};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Succeeds instantly with a fixed coverage sample and counts calls
    pub(crate) struct CountingBackend {
        inner: MockBackend,
        suggestion_calls: AtomicUsize,
        availability_calls: AtomicUsize,
        lead_calls: AtomicUsize,
    }

    impl CountingBackend {
        pub(crate) fn with_sample(sample: f64) -> Self {
            let availability =
                SimulatedAvailability::with_source(Box::new(FixedSample(sample)), Duration::ZERO);
            Self {
                inner: MockBackend::with_availability(LatencyConfig::none(), Box::new(availability)),
                suggestion_calls: AtomicUsize::new(0),
                availability_calls: AtomicUsize::new(0),
                lead_calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn suggestion_calls(&self) -> usize {
            self.suggestion_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn availability_calls(&self) -> usize {
            self.availability_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn lead_calls(&self) -> usize {
            self.lead_calls.load(Ordering::SeqCst)
        }
    }

    impl Default for CountingBackend {
        /// 0.7 covers frogfoot and openserve
        fn default() -> Self {
            Self::with_sample(0.7)
        }
    }

    #[async_trait]
    impl Backend for CountingBackend {
        async fn address_suggestions(&self, query: &str) -> CoreResult<Vec<String>> {
            self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.address_suggestions(query).await
        }

        async fn check_availability(&self, address: &Address) -> CoreResult<AvailabilityResult> {
            self.availability_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.check_availability(address).await
        }

        async fn packages(&self) -> CoreResult<Vec<Package>> {
            self.inner.packages().await
        }

        async fn submit_lead(&self, lead: &Lead) -> CoreResult<bool> {
            self.lead_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.submit_lead(lead).await
        }
    }

    /// Every call fails in transit
    pub(crate) struct FailingBackend;

    #[async_trait]
    impl Backend for FailingBackend {
        async fn address_suggestions(&self, _query: &str) -> CoreResult<Vec<String>> {
            Err(CoreError::Transport("connection refused".to_string()))
        }

        async fn check_availability(&self, _address: &Address) -> CoreResult<AvailabilityResult> {
            Err(CoreError::Transport("connection refused".to_string()))
        }

        async fn packages(&self) -> CoreResult<Vec<Package>> {
            Err(CoreError::Transport("connection refused".to_string()))
        }

        async fn submit_lead(&self, _lead: &Lead) -> CoreResult<bool> {
            Err(CoreError::Transport("connection refused".to_string()))
        }
    }

    fn lead(phone: &str) -> Lead {
        Lead {
            package_id: "os-10".to_string(),
            address: Address::new("15 Fibre Way", "Sandton", "Johannesburg"),
            name: "Sipho".to_string(),
            email: "sipho@example.com".to_string(),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_suggestion_templates() {
        assert!(suggestions_for("ab").is_empty());
        let suggestions = suggestions_for("Oak");
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "Oak Street, Sandton, Johannesburg");
        assert_eq!(suggestions[4], "12 Oak Way, Midrand");
    }

    #[tokio::test]
    async fn test_mock_records_leads() {
        let backend = MockBackend::new(LatencyConfig::none());
        assert!(backend.submit_lead(&lead("082 000 0000")).await.unwrap());
        let submitted = backend.submitted().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].lead.package_id, "os-10");
    }

    #[tokio::test]
    async fn test_mock_rejects_invalid_lead() {
        let backend = MockBackend::new(LatencyConfig::none());
        let err = backend.submit_lead(&lead(" ")).await.unwrap_err();
        assert_eq!(err, CoreError::MissingField(FormField::Phone));
        assert!(backend.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_packages_and_short_query() {
        let backend = MockBackend::new(LatencyConfig::none());
        assert_eq!(backend.packages().await.unwrap().len(), 9);
        assert!(backend.address_suggestions("12").await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_honours_latency() {
        let backend = MockBackend::new(LatencyConfig::default());
        let started = tokio::time::Instant::now();
        backend.packages().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}

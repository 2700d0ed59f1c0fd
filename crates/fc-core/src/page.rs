//! Landing page state
//!
//! One explicitly owned object holds everything the page mutates: the
//! loaded catalog, the latest coverage result and the address it was for,
//! the lead workflow, autocomplete, the plan builder and the storefront.
//! Handlers take it by `&mut` so updates are applied one event at a time.

use crate::address::Address;
use crate::autocomplete::Autocomplete;
use crate::availability::AvailabilityResult;
use crate::backend::Backend;
use crate::builder::PlanBuilder;
use crate::cart::Storefront;
use crate::catalog::Package;
use crate::config::LatencyConfig;
use crate::lead::LeadWorkflow;
use crate::locate::{locate_address, Geolocator};
use crate::packages::select_packages;
use crate::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::{info, warn};

pub const CHECK_FAILED: &str = "Something went wrong. Please try again.";

/// What the pricing area shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverageView<'a> {
    /// No check yet: preview of the whole catalog
    NotChecked,
    Covered {
        address: &'a Address,
        result: &'a AvailabilityResult,
    },
    /// Checked, nothing serves the address
    NotCovered { address: &'a Address },
}

pub struct LandingPage {
    backend: Arc<dyn Backend>,
    latency: LatencyConfig,
    packages: Vec<Package>,
    availability: Option<AvailabilityResult>,
    address: Option<Address>,
    lead: LeadWorkflow,
    autocomplete: Autocomplete,
    builder: PlanBuilder,
    storefront: Storefront,
}

impl LandingPage {
    pub fn new(backend: Arc<dyn Backend>, latency: LatencyConfig) -> Self {
        Self {
            backend,
            latency,
            packages: Vec::new(),
            availability: None,
            address: None,
            lead: LeadWorkflow::new(),
            autocomplete: Autocomplete::new(),
            builder: PlanBuilder::new(),
            storefront: Storefront::new(),
        }
    }

    /// Fetch the package catalog; called once when the page mounts.
    pub async fn load_packages(&mut self) -> CoreResult<()> {
        self.packages = self.backend.packages().await?;
        info!("Loaded {} packages", self.packages.len());
        Ok(())
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn availability(&self) -> Option<&AvailabilityResult> {
        self.availability.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Validate and parse `input`, then ask the backend for coverage. The
    /// new result replaces any earlier one. Input errors return before the
    /// backend is called; backend errors keep the previous result.
    pub async fn check_address(&mut self, input: &str) -> CoreResult<&AvailabilityResult> {
        let address = Address::from_input(input)?;
        self.autocomplete.dismiss();

        let result = match self.backend.check_availability(&address).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Availability check failed for {}: {}", address, e);
                return Err(CoreError::Transport(CHECK_FAILED.to_string()));
            }
        };

        info!(
            "Coverage for {}: available={} providers={:?}",
            address, result.available, result.providers
        );
        self.address = Some(address);
        let result: &AvailabilityResult = self.availability.insert(result);
        Ok(result)
    }

    pub fn coverage(&self) -> CoverageView<'_> {
        match (&self.availability, &self.address) {
            (Some(result), Some(address)) if result.available => {
                CoverageView::Covered { address, result }
            }
            (Some(_), Some(address)) => CoverageView::NotCovered { address },
            _ => CoverageView::NotChecked,
        }
    }

    /// The plan builder is offered until the first coverage check.
    pub fn shows_builder(&self) -> bool {
        self.availability.is_none()
    }

    /// Packages in the pricing grid, cheapest first
    pub fn displayed_packages(&self) -> Vec<&Package> {
        match self.coverage() {
            CoverageView::NotChecked => select_packages::<String>(&self.packages, None),
            CoverageView::Covered { result, .. } => {
                select_packages(&self.packages, Some(result.providers.as_slice()))
            }
            CoverageView::NotCovered { .. } => Vec::new(),
        }
    }

    /// Open the lead form for a package from the covered grid.
    pub fn select_package(&mut self, id: &str) -> CoreResult<()> {
        if !matches!(self.coverage(), CoverageView::Covered { .. }) {
            return Err(CoreError::Validation(
                "check coverage for your address before choosing a package".to_string(),
            ));
        }
        let package = self
            .displayed_packages()
            .into_iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Catalog(format!("package '{}' is not offered here", id)))?;
        self.lead.choose_package(package)
    }

    pub fn lead(&self) -> &LeadWorkflow {
        &self.lead
    }

    pub fn lead_mut(&mut self) -> &mut LeadWorkflow {
        &mut self.lead
    }

    pub async fn submit_lead(&mut self) -> CoreResult<()> {
        self.lead
            .submit(self.address.as_ref(), self.backend.as_ref())
            .await
    }

    pub fn close_lead(&mut self) {
        self.lead.close();
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Keystroke in the address box. Returns whether the response was
    /// applied.
    pub async fn on_address_input(&self, query: &str) -> CoreResult<bool> {
        self.autocomplete.on_input(self.backend.as_ref(), query).await
    }

    /// Resolve the device position to an address string for the input box.
    pub async fn use_my_location(&self, geolocator: &dyn Geolocator) -> CoreResult<String> {
        self.autocomplete.dismiss();
        locate_address(geolocator, &self.latency).await
    }

    pub fn builder(&self) -> &PlanBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut PlanBuilder {
        &mut self.builder
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn storefront_mut(&mut self) -> &mut Storefront {
        &mut self.storefront
    }
}

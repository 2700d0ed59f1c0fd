//! FibreConnect Core
//!
//! This crate holds the decision logic behind the FibreConnect site:
//! address coverage checks, the package catalog and its price-sorted
//! filtering, the plan builder, the lead capture workflow and the
//! storefront cart. Outward calls go through the [`Backend`] trait so the
//! simulated backend can be swapped for a real one.

pub mod address;
pub mod autocomplete;
pub mod availability;
pub mod backend;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod lead;
pub mod locate;
pub mod packages;
pub mod page;

use std::time::Duration;
use thiserror::Error;

pub use address::Address;
pub use autocomplete::{Autocomplete, RequestToken};
pub use availability::{AvailabilityProvider, AvailabilityResult, SimulatedAvailability};
pub use backend::{Backend, MockBackend, SubmittedLead};
pub use builder::{PlanBuilder, PlanSummary};
pub use cart::{Cart, CartItem, Storefront};
pub use catalog::{
    Catalog, Category, ContractType, Frequency, HostingPlan, Package, PlanOption, Product,
    Provider,
};
pub use config::LatencyConfig;
pub use lead::{FormField, Lead, LeadForm, LeadState, LeadWorkflow, SubmissionToken};
pub use locate::{Coordinates, Geolocator};
pub use packages::select_packages;
pub use page::{CoverageView, LandingPage};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(FormField),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Geolocation error: {0}")]
    Geolocation(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Caught before any outward call; the caller shows it next to the input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::MissingField(_))
    }

    /// The outward call itself failed and may be retried.
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Transport(_) | CoreError::Timeout(_))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

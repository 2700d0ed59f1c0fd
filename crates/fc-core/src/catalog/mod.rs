//! Static catalog tables
//!
//! Providers and their fibre packages, the plan builder options, the
//! storefront power products and the hosting tiers. Everything here is
//! compiled in and never mutated after startup.

pub mod builder;
pub mod data;
pub mod hosting;
pub mod store;

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use builder::{ContractType, Frequency, PlanOption};
pub use hosting::HostingPlan;
pub use store::{Category, Product, ProductSpec};

/// An upstream network operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub logo: String,
    /// 1-5
    pub rating: f32,
    pub sla: String,
}

/// A priced fibre offering tied to one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    /// Mbps
    pub speed_down: u32,
    /// Mbps
    pub speed_up: u32,
    pub price: u32,
    pub features: Vec<String>,
    pub contract_term: String,
    pub has_router: bool,
    pub has_installation: bool,
    pub uncapped: bool,
}

impl Package {
    pub fn is_symmetrical(&self) -> bool {
        self.speed_down == self.speed_up
    }
}

/// Provider and package tables with referential integrity checked on load
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    providers: Vec<Provider>,
    packages: Vec<Package>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and packages whose provider
    /// is not in the provider table.
    pub fn new(providers: Vec<Provider>, packages: Vec<Package>) -> CoreResult<Self> {
        let mut provider_ids = HashSet::new();
        for provider in &providers {
            if !provider_ids.insert(provider.id.as_str()) {
                return Err(CoreError::Catalog(format!(
                    "duplicate provider id '{}'",
                    provider.id
                )));
            }
            if !(1.0..=5.0).contains(&provider.rating) {
                return Err(CoreError::Catalog(format!(
                    "provider '{}' rating {} outside 1-5",
                    provider.id, provider.rating
                )));
            }
        }

        let mut package_ids = HashSet::new();
        for package in &packages {
            if !package_ids.insert(package.id.as_str()) {
                return Err(CoreError::Catalog(format!(
                    "duplicate package id '{}'",
                    package.id
                )));
            }
            if !provider_ids.contains(package.provider_id.as_str()) {
                return Err(CoreError::Catalog(format!(
                    "package '{}' references unknown provider '{}'",
                    package.id, package.provider_id
                )));
            }
            if package.price == 0 || package.speed_down == 0 || package.speed_up == 0 {
                return Err(CoreError::Catalog(format!(
                    "package '{}' must have a positive price and speeds",
                    package.id
                )));
            }
        }

        Ok(Self {
            providers,
            packages,
        })
    }

    /// The compiled-in provider and package tables
    pub fn builtin() -> Self {
        Self {
            providers: data::providers(),
            packages: data::packages(),
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

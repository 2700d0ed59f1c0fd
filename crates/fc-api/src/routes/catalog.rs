//! Catalog read routes

use super::status_for;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use fc_core::catalog::hosting::hosting_plans;
use fc_core::catalog::store::products_in;
use fc_core::{
    select_packages, Backend, Category, ContractType, CoreError, Frequency, HostingPlan, Package,
    PlanBuilder, PlanOption, PlanSummary, Product, Provider,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PackageQuery {
    /// Comma-separated provider ids
    pub providers: Option<String>,
}

#[derive(Deserialize)]
pub struct BuilderQuery {
    pub contract: Option<String>,
    pub frequency: Option<String>,
    pub plan: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderResponse {
    pub contract_type: ContractType,
    pub frequency: Frequency,
    pub frequencies: Vec<Frequency>,
    pub frequency_locked: bool,
    pub plans: Vec<PlanOption>,
    pub summary: Option<PlanSummary>,
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<Vec<Provider>> {
    Json(state.backend.catalog().providers().to_vec())
}

pub async fn list_packages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PackageQuery>,
) -> Result<Json<Vec<Package>>, StatusCode> {
    let packages = state.backend.packages().await.map_err(|e| status_for(&e))?;

    let providers: Option<Vec<&str>> = query.providers.as_deref().map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect()
    });

    let selected = select_packages(&packages, providers.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(selected))
}

fn parse<T>(value: Option<&str>) -> Result<Option<T>, StatusCode>
where
    T: FromStr<Err = CoreError>,
{
    value
        .map(T::from_str)
        .transpose()
        .map_err(|e| status_for(&e))
}

/// Run the builder through the requested contract, frequency and plan in
/// the order a visitor would pick them.
pub async fn build_plan(
    Query(query): Query<BuilderQuery>,
) -> Result<Json<BuilderResponse>, StatusCode> {
    let contract = parse::<ContractType>(query.contract.as_deref())?;
    let frequency = parse::<Frequency>(query.frequency.as_deref())?;

    let mut builder = PlanBuilder::new();
    if let Some(contract) = contract {
        builder.set_contract(contract);
    }
    if let Some(frequency) = frequency {
        builder.set_frequency(frequency);
    }
    if let Some(plan) = query.plan.as_deref() {
        builder.select_plan(plan);
    }

    Ok(Json(BuilderResponse {
        contract_type: builder.contract(),
        frequency: builder.frequency(),
        frequencies: builder.available_frequencies().to_vec(),
        frequency_locked: builder.frequency_locked(),
        plans: builder.available_plans().into_iter().cloned().collect(),
        summary: builder.summary(),
    }))
}

pub async fn list_products(
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    let category = parse::<Category>(query.category.as_deref())?.unwrap_or(Category::All);
    Ok(Json(products_in(category)))
}

pub async fn list_hosting() -> Json<Vec<HostingPlan>> {
    Json(hosting_plans())
}

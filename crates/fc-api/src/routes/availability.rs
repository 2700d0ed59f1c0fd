//! Address suggestion and coverage routes

use super::status_for;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use fc_core::address::INVALID_ADDRESS;
use fc_core::{Address, AvailabilityResult, Backend, CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// Either the structured address or the text typed into the search box
#[derive(Deserialize)]
#[serde(untagged)]
pub enum AvailabilityRequest {
    Structured(Address),
    Text { address: String },
}

impl AvailabilityRequest {
    fn into_address(self) -> CoreResult<Address> {
        match self {
            AvailabilityRequest::Structured(address) => {
                if address.street.trim().is_empty() {
                    return Err(CoreError::Validation(INVALID_ADDRESS.to_string()));
                }
                Ok(address)
            }
            AvailabilityRequest::Text { address } => Address::from_input(&address),
        }
    }
}

pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<SuggestionsResponse>, StatusCode> {
    let suggestions = state
        .backend
        .address_suggestions(&query.q)
        .await
        .map_err(|e| status_for(&e))?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResult>, StatusCode> {
    let address = request.into_address().map_err(|e| status_for(&e))?;

    let result = state
        .backend
        .check_availability(&address)
        .await
        .map_err(|e| status_for(&e))?;

    Ok(Json(result))
}

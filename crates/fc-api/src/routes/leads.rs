//! Lead submission route

use super::status_for;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use fc_core::{Backend, Lead};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
pub struct LeadResponse {
    pub accepted: bool,
    pub message: String,
}

pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    Json(lead): Json<Lead>,
) -> Result<Json<LeadResponse>, StatusCode> {
    let accepted = state
        .backend
        .submit_lead(&lead)
        .await
        .map_err(|e| status_for(&e))?;

    info!("Lead for {} accepted={}", lead.package_id, accepted);

    let message = if accepted {
        format!(
            "Thanks {}! An agent will call you on {} shortly.",
            lead.name, lead.phone
        )
    } else {
        "We couldn't confirm your order. Please try again.".to_string()
    };

    Ok(Json(LeadResponse { accepted, message }))
}

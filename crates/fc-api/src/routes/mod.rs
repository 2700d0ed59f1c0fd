//! API routes

pub mod availability;
pub mod catalog;
pub mod leads;

use axum::{http::StatusCode, Json};
use fc_core::CoreError;
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Status code for a core error
pub fn status_for(err: &CoreError) -> StatusCode {
    warn!("Request failed: {}", err);
    match err {
        e if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_transport() => StatusCode::BAD_GATEWAY,
        CoreError::Catalog(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::FormField;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&CoreError::MissingField(FormField::Email)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&CoreError::Catalog("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&CoreError::Transport("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&CoreError::Timeout(Duration::from_secs(1))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&CoreError::Config("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

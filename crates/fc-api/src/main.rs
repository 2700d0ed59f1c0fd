//! FibreConnect API Server

mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use fc_core::{LatencyConfig, MockBackend};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub backend: MockBackend,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub simulate_latency: bool,
}

impl AppConfig {
    pub fn latency(&self) -> LatencyConfig {
        if self.simulate_latency {
            LatencyConfig::default()
        } else {
            LatencyConfig::none()
        }
    }
}

fn flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("FC_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            simulate_latency: std::env::var("FC_SIMULATE_LATENCY")
                .map(|v| flag(&v))
                .unwrap_or(true),
        }
    }
}

/// Build the router over `state`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Address lookups
        .route("/api/suggestions", get(routes::availability::suggestions))
        .route("/api/availability", post(routes::availability::check_availability))

        // Catalog
        .route("/api/providers", get(routes::catalog::list_providers))
        .route("/api/packages", get(routes::catalog::list_packages))
        .route("/api/builder", get(routes::catalog::build_plan))
        .route("/api/products", get(routes::catalog::list_products))
        .route("/api/hosting", get(routes::catalog::list_hosting))

        // Leads
        .route("/api/leads", post(routes::leads::submit_lead))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "fc_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FibreConnect API Server");

    let config = AppConfig::default();
    info!("Simulated latency: {}", config.simulate_latency);

    let state = Arc::new(AppState {
        backend: MockBackend::new(config.latency()),
        config,
    });

    let addr = state.config.bind_addr.clone();
    let app = app(state);

    info!("Listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! textlens-functions
//!
//! HTTP surface of textlens, served as an Azure Functions custom handler.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router. Paths carry the Functions host's `/api` prefix.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health (does not touch storage)
        .route("/api/health", get(routes::health::health_check))
        .route("/api/TextAnalyzer", get(routes::analyze::analyze_text))
        .route("/api/TextAnalyzer", post(routes::analyze::analyze_text))
        .route(
            "/api/GetAnalysisHistory",
            get(routes::history::get_history),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

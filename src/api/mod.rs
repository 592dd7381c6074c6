//! REST API for on-demand calculations and the last CLI outcome.
//!
//! Endpoints:
//! - `GET /outcome` — outcome of the analysis the server was started with
//! - `POST /usage` — single-period usage for a JSON profile
//! - `POST /savings` — single-period auto-off savings for a JSON profile
//! - `POST /usage/day` — usage for one day of a month profile

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::info;

use crate::runner::Outcome;

/// Immutable application state shared across all request handlers.
///
/// Calculations are pure, so handlers need no locks.
pub struct AppState {
    /// Outcome computed before the server started.
    pub outcome: Outcome,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/outcome", get(handlers::get_outcome))
        .route("/usage", post(handlers::post_usage))
        .route("/savings", post(handlers::post_savings))
        .route("/usage/day", post(handlers::post_usage_for_day))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}

//! API routes for zacapoints
//!
//! - [`health`] - health check and version
//! - [`auth`] - login, profile, password, user management
//! - [`stores`] - active store directory
//! - [`reports`] - shift capture, listings and summaries

pub mod extract;
pub mod health;

mod auth;
mod reports;
mod stores;

use axum::Router;
use axum::routing::get;
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version))
        .merge(auth::router(&state))
        .merge(stores::router(&state))
        .merge(reports::router(&state))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unmatched paths answer with the error envelope
async fn not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}

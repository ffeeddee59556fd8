//! Store directory routes

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_auth;
use crate::state::AppState;

/// - /api/tiendas: any authenticated user
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/tiendas", get(handler::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

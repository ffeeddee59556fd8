//! Daily report routes

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::{require_auth, require_role};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/reportes", routes(state))
}

fn routes(state: &AppState) -> Router<AppState> {
    let any_role = Router::new()
        .route("/", get(handler::list))
        .route("/diario", post(handler::capture))
        .route("/resumen-mes", get(handler::month_summary));

    let store_only = Router::new()
        .route("/diario/hoy", get(handler::today))
        .route_layer(middleware::from_fn(require_role(Role::Tienda)));

    let admin_only = Router::new()
        .route("/resumen-dia", get(handler::day_summary))
        .route_layer(middleware::from_fn(require_role(Role::Admin)));

    any_role
        .merge(store_only)
        .merge(admin_only)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

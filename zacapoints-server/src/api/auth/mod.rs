//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post};
use shared::models::Role;

use crate::auth::{require_auth, require_role};
use crate::state::AppState;

/// Build authentication router
/// - /api/auth/login: public
/// - /api/auth/perfil, cambiar-password, fijar-admin: any authenticated user
/// - /api/auth/crear-usuario: ADMIN
pub fn router(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/api/auth/login", post(handler::login));

    let authenticated = Router::new()
        .route("/api/auth/perfil", get(handler::profile))
        .route("/api/auth/cambiar-password", post(handler::change_password))
        .route("/api/auth/fijar-admin", post(handler::promote_admin));

    let admin = Router::new()
        .route("/api/auth/crear-usuario", post(handler::create_user))
        .route_layer(middleware::from_fn(require_role(Role::Admin)));

    let protected = authenticated
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(protected)
}

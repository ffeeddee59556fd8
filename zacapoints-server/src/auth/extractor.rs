//! CurrentUser extractor
//!
//! Handlers behind [`super::require_auth`] take `CurrentUser` directly; the
//! extractor reuses the identity the middleware attached and falls back to
//! validating the header itself.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use super::CurrentUser;
use super::middleware::authenticate;
use crate::state::AppState;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&state.jwt, &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

//! Authentication middleware
//!
//! Interceptor chain for protected routes: [`require_auth`] attaches the
//! [`CurrentUser`] to request extensions, [`require_role`] checks it.
//!
//! ```ignore
//! Router::new()
//!     .route("/resumen-dia", get(handler::daily_summary))
//!     .route_layer(middleware::from_fn(require_role(Role::Admin)))
//!     .route_layer(middleware::from_fn_with_state(state, require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::security_log;
use crate::state::AppState;

pub(crate) const MISSING_TOKEN: &str = "Falta token (Authorization: Bearer ...)";
pub(crate) const BAD_TOKEN: &str = "Token inválido o expirado";

/// Resolve the identity carried by the `Authorization` header
pub(crate) fn authenticate(
    jwt: &JwtService,
    headers: &HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match header.and_then(JwtService::extract_from_header) {
        Some(token) => token,
        None => {
            security_log!(WARN, "auth_missing", uri = %uri);
            return Err(AppError::with_message(
                ErrorCode::NotAuthenticated,
                MISSING_TOKEN,
            ));
        }
    };

    let claims = jwt.validate_token(token).map_err(|e| {
        security_log!(WARN, "auth_failed", error = %e, uri = %uri);
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token(BAD_TOKEN),
        }
    })?;

    CurrentUser::try_from(claims).map_err(|e| {
        security_log!(WARN, "auth_malformed_claims", error = %e, uri = %uri);
        AppError::invalid_token(BAD_TOKEN)
    })
}

/// Authentication middleware - requires a valid session token
///
/// | Failure | Status |
/// |---------|--------|
/// | Missing or malformed header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Bad signature / garbage | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state.jwt, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role check - the attached identity must have exactly `role`
///
/// There is no hierarchy: `require_role(Role::Tienda)` rejects ADMIN.
pub fn require_role(
    role: Role,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(|| AppError::with_message(ErrorCode::NotAuthenticated, "No autenticado"))?;

            if user.rol != role {
                security_log!(
                    WARN,
                    "role_denied",
                    user_id = user.id_usuario,
                    user_role = %user.rol,
                    required_role = %role
                );
                return Err(AppError::with_message(
                    ErrorCode::RoleRequired,
                    format!("Acceso denegado. Requiere rol: {role}"),
                ));
            }

            Ok(next.run(req).await)
        })
    }
}

//! Authentication Handlers

use axum::extract::State;
use serde::Serialize;
use shared::error::{ApiResponse, AppResult};
use shared::models::{LoginRequest, PasswordChange, UserCreate, UserProfile};

use crate::api::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::services::auth::{self as service, LoginResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub usuario: UserProfile,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResult>> {
    let result = service::login(&state, req).await?;
    Ok(ApiResponse::success_with_message("Login correcto", result))
}

/// GET /api/auth/perfil
pub async fn profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<ApiResponse<ProfileBody>> {
    let usuario = service::profile(&state, &current).await?;
    Ok(ApiResponse::success(ProfileBody { usuario }))
}

/// POST /api/auth/cambiar-password
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(req): ApiJson<PasswordChange>,
) -> AppResult<ApiResponse<()>> {
    service::change_password(&state, &current, req).await?;
    Ok(ApiResponse::ok("Contraseña actualizada"))
}

/// POST /api/auth/crear-usuario (ADMIN)
pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(req): ApiJson<UserCreate>,
) -> AppResult<ApiResponse<ProfileBody>> {
    let usuario = service::create_user(&state, &current, req).await?;
    Ok(ApiResponse::success_with_message(
        "Usuario creado",
        ProfileBody { usuario },
    ))
}

/// POST /api/auth/fijar-admin (bootstrap account only)
pub async fn promote_admin(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<ApiResponse<ProfileBody>> {
    let usuario = service::promote_bootstrap_admin(&state, &current).await?;
    Ok(ApiResponse::success_with_message(
        "Usuario actualizado a ADMIN",
        ProfileBody { usuario },
    ))
}

//! Account operations: login, password change, user creation, admin fix-up

use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LoginRequest, PasswordChange, Role, UserCreate, UserProfile};

use super::{non_empty, require_text};
use crate::auth::{CurrentUser, MIN_PASSWORD_LEN, is_bcrypt_hash};
use crate::db::{NewUser, RepoError};
use crate::state::AppState;
use crate::{audit_log, security_log};

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub usuario: UserProfile,
}

fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Verify credentials and issue a session token
///
/// Unknown login and wrong password share one message so login names
/// cannot be probed.
pub async fn login(state: &AppState, req: LoginRequest) -> AppResult<LoginResult> {
    let (Some(usuario), Some(password)) = (
        non_empty(req.usuario.as_deref()),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Faltan datos: usuario y password",
        ));
    };

    let Some(user) = state.users.find_by_login(usuario).await? else {
        security_log!(WARN, "login_failed", usuario = %usuario, reason = "user_not_found");
        return Err(AppError::invalid_credentials());
    };

    if !user.activo {
        security_log!(WARN, "login_failed", usuario = %usuario, reason = "account_disabled");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    if !is_bcrypt_hash(&user.password) {
        security_log!(
            ERROR,
            "login_failed",
            usuario = %usuario,
            reason = "stored_password_not_hashed"
        );
        return Err(AppError::invalid_credentials());
    }

    if !state.hasher.verify(password, &user.password).await? {
        security_log!(WARN, "login_failed", usuario = %usuario, reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt.generate_token(&user).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate token");
        AppError::new(ErrorCode::InternalError)
    })?;

    security_log!(INFO, "login_success", user_id = user.id_usuario, rol = %user.rol);

    Ok(LoginResult {
        token,
        usuario: user.profile(),
    })
}

/// Current profile of the authenticated user, read fresh from storage
pub async fn profile(state: &AppState, current: &CurrentUser) -> AppResult<UserProfile> {
    state
        .users
        .find_by_id(current.id_usuario)
        .await?
        .map(|u| u.profile())
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
}

/// Replace the caller's password and clear the must-change flag
pub async fn change_password(
    state: &AppState,
    current: &CurrentUser,
    req: PasswordChange,
) -> AppResult<()> {
    let actual = req
        .password_actual
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password_actual"))?;
    let nueva = req
        .password_nueva
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password_nueva"))?;

    let user = state
        .users
        .find_by_id(current.id_usuario)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !is_bcrypt_hash(&user.password) {
        tracing::error!(
            user_id = user.id_usuario,
            "Stored password is not a bcrypt hash"
        );
        return Err(AppError::new(ErrorCode::PasswordHashInvalid));
    }

    if !state.hasher.verify(&actual, &user.password).await? {
        security_log!(
            WARN,
            "password_change_failed",
            user_id = user.id_usuario,
            reason = "bad_current_password"
        );
        return Err(AppError::with_message(
            ErrorCode::InvalidCredentials,
            "Password actual incorrecto",
        ));
    }

    if !password_long_enough(&nueva) {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let hash = state.hasher.hash(&nueva).await?;
    state
        .users
        .update_password(user.id_usuario, &hash)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
            other => other.into(),
        })?;

    audit_log!(user.id_usuario, "change_password", format!("usuario:{}", user.usuario));
    Ok(())
}

/// Create a user (ADMIN only, enforced by the router)
pub async fn create_user(
    state: &AppState,
    current: &CurrentUser,
    req: UserCreate,
) -> AppResult<UserProfile> {
    let nombre = require_text(req.nombre.as_deref(), "nombre")?;
    let usuario = require_text(req.usuario.as_deref(), "usuario")?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password"))?;
    let rol_text = require_text(req.rol.as_deref(), "rol")?;
    let rol = Role::from_db(&rol_text).ok_or_else(|| AppError::new(ErrorCode::InvalidRole))?;

    let id_tienda = match rol {
        Role::Admin => None,
        Role::Tienda => {
            let id = req
                .id_tienda
                .filter(|id| *id > 0)
                .ok_or_else(|| AppError::new(ErrorCode::StoreRequired))?;
            Some(id)
        }
    };

    if !password_long_enough(&password) {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            "El password debe tener al menos 4 caracteres",
        ));
    }

    if let Some(id) = id_tienda
        && state.stores.find_active(id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::StoreNotFound).with_detail("id_tienda", id));
    }

    let password_hash = state.hasher.hash(&password).await?;
    let user = state
        .users
        .create(NewUser {
            nombre,
            usuario: usuario.clone(),
            password_hash,
            rol,
            id_tienda,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::new(ErrorCode::UsernameTaken).with_detail("usuario", usuario.clone())
            }
            other => other.into(),
        })?;

    audit_log!(
        current.id_usuario,
        "create_user",
        format!("usuario:{}", user.usuario),
        format!("rol={} id_tienda={:?}", user.rol, user.id_tienda)
    );
    Ok(user.profile())
}

/// Promote the bootstrap account to ADMIN and clear its store binding
pub async fn promote_bootstrap_admin(
    state: &AppState,
    current: &CurrentUser,
) -> AppResult<UserProfile> {
    if current.id_usuario != state.config.bootstrap_admin_id {
        security_log!(
            WARN,
            "bootstrap_denied",
            user_id = current.id_usuario
        );
        return Err(AppError::new(ErrorCode::BootstrapOnly));
    }

    let user = state
        .users
        .promote_to_admin(current.id_usuario)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
            other => other.into(),
        })?;

    audit_log!(user.id_usuario, "promote_admin", format!("usuario:{}", user.usuario));
    Ok(user.profile())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn login_req(usuario: &str, password: &str) -> LoginRequest {
        LoginRequest {
            usuario: Some(usuario.into()),
            password: Some(password.into()),
        }
    }

    fn ctx() -> TestContext {
        context_at(mexico(2026, 2, 10, 10, 0))
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let ctx = ctx();
        let result = login(&ctx.state, login_req("sur", STORE_PASSWORD)).await.unwrap();
        assert_eq!(result.usuario.id_usuario, SUR_USER_ID);
        assert_eq!(result.usuario.rol, Role::Tienda);
        assert_eq!(result.usuario.id_tienda, Some(3));

        let claims = ctx.state.jwt.validate_token(&result.token).unwrap();
        assert_eq!(claims.sub, SUR_USER_ID.to_string());
        assert_eq!(claims.rol, "TIENDA");
        assert_eq!(claims.id_tienda, Some(3));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let err = login(&ctx().state, login_req("sur", "nope")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.http_status(), http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_unauthorized() {
        let err = login(&ctx().state, login_req("nadie", "x")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_login_name_is_exact() {
        let err = login(&ctx().state, login_req("SUR", STORE_PASSWORD)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_inactive_is_forbidden_before_password_check() {
        let err = login(&ctx().state, login_req("baja", "wrong")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountDisabled);
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let err = login(&ctx().state, LoginRequest::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_login_unhashed_row_never_matches() {
        let err = login(&ctx().state, login_req("legado", "1234")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_change_password_flow() {
        let ctx = ctx();
        let req = PasswordChange {
            password_actual: Some(STORE_PASSWORD.into()),
            password_nueva: Some("nueva-clave".into()),
        };
        change_password(&ctx.state, &tienda_sur(), req).await.unwrap();

        let result = login(&ctx.state, login_req("sur", "nueva-clave")).await.unwrap();
        assert!(!result.usuario.debe_cambiar_password);
        assert!(login(&ctx.state, login_req("sur", STORE_PASSWORD)).await.is_err());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let req = PasswordChange {
            password_actual: Some("equivocada".into()),
            password_nueva: Some("nueva-clave".into()),
        };
        let err = change_password(&ctx().state, &tienda_sur(), req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_change_password_too_short() {
        let req = PasswordChange {
            password_actual: Some(STORE_PASSWORD.into()),
            password_nueva: Some("abc".into()),
        };
        let err = change_password(&ctx().state, &tienda_sur(), req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_change_password_unhashed_row_is_internal() {
        let legacy = identity(LEGACY_USER_ID, Role::Tienda, Some(2));
        let req = PasswordChange {
            password_actual: Some("1234".into()),
            password_nueva: Some("nueva-clave".into()),
        };
        let err = change_password(&ctx().state, &legacy, req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordHashInvalid);
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_change_password_vanished_user() {
        let ghost = identity(99, Role::Tienda, Some(1));
        let req = PasswordChange {
            password_actual: Some("x".into()),
            password_nueva: Some("nueva-clave".into()),
        };
        let err = change_password(&ctx().state, &ghost, req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    fn new_user(usuario: &str, rol: &str, id_tienda: Option<i64>) -> UserCreate {
        UserCreate {
            nombre: Some("Nuevo".into()),
            usuario: Some(usuario.into()),
            password: Some("secreto".into()),
            rol: Some(rol.into()),
            id_tienda,
        }
    }

    #[tokio::test]
    async fn test_create_store_user() {
        let ctx = ctx();
        let profile = create_user(&ctx.state, &admin(), new_user("norte", "TIENDA", Some(2)))
            .await
            .unwrap();
        assert_eq!(profile.rol, Role::Tienda);
        assert_eq!(profile.id_tienda, Some(2));
        assert!(profile.debe_cambiar_password);

        let result = login(&ctx.state, login_req("norte", "secreto")).await.unwrap();
        assert!(result.usuario.debe_cambiar_password);
    }

    #[tokio::test]
    async fn test_create_admin_drops_store() {
        let profile = create_user(&ctx().state, &admin(), new_user("jefa", "ADMIN", Some(2)))
            .await
            .unwrap();
        assert_eq!(profile.rol, Role::Admin);
        assert_eq!(profile.id_tienda, None);
    }

    #[tokio::test]
    async fn test_create_user_validation() {
        let state = ctx().state;

        let err = create_user(&state, &admin(), new_user("x1", "CAJERO", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRole);

        let err = create_user(&state, &admin(), new_user("x2", "TIENDA", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreRequired);

        let err = create_user(&state, &admin(), new_user("x3", "TIENDA", Some(4)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreNotFound);

        let mut short = new_user("x4", "TIENDA", Some(1));
        short.password = Some("123".into());
        let err = create_user(&state, &admin(), short).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);

        let mut missing = new_user("x5", "TIENDA", Some(1));
        missing.nombre = None;
        let err = create_user(&state, &admin(), missing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap().get("campo").unwrap(), "nombre");
    }

    #[tokio::test]
    async fn test_create_user_taken_login_is_conflict() {
        let err = create_user(&ctx().state, &admin(), new_user("sur", "TIENDA", Some(3)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameTaken);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_promote_bootstrap_only() {
        let ctx = ctx();
        let err = promote_bootstrap_admin(&ctx.state, &identity(SECOND_ADMIN_ID, Role::Admin, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BootstrapOnly);

        let profile = promote_bootstrap_admin(&ctx.state, &admin()).await.unwrap();
        assert_eq!(profile.rol, Role::Admin);
        assert_eq!(profile.id_tienda, None);
    }

    #[tokio::test]
    async fn test_profile_reads_storage() {
        let profile = profile(&ctx().state, &tienda_sur()).await.unwrap();
        assert_eq!(profile.usuario, "sur");
    }
}

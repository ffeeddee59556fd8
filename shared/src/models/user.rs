//! User Model

use serde::{Deserialize, Serialize};

use super::role::Role;

/// User row
///
/// Never serialized as-is: it carries the password hash. Use
/// [`User::profile`] for anything that leaves the server.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id_usuario: i64,
    pub nombre: String,
    /// Login name (exact match on login)
    pub usuario: String,
    /// bcrypt hash
    pub password: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub rol: Role,
    /// Owning store (required for TIENDA, absent for ADMIN)
    pub id_tienda: Option<i64>,
    pub activo: bool,
    pub debe_cambiar_password: bool,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id_usuario: self.id_usuario,
            nombre: self.nombre.clone(),
            usuario: self.usuario.clone(),
            rol: self.rol,
            id_tienda: self.id_tienda,
            debe_cambiar_password: self.debe_cambiar_password,
        }
    }
}

/// User profile returned to clients (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id_usuario: i64,
    pub nombre: String,
    pub usuario: String,
    pub rol: Role,
    pub id_tienda: Option<i64>,
    pub debe_cambiar_password: bool,
}

/// Create user payload (`POST /api/auth/crear-usuario`)
///
/// Fields are optional so that missing ones are reported by name
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub nombre: Option<String>,
    pub usuario: Option<String>,
    pub password: Option<String>,
    /// "ADMIN" | "TIENDA"
    pub rol: Option<String>,
    pub id_tienda: Option<i64>,
}

/// Login payload (`POST /api/auth/login`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub usuario: Option<String>,
    pub password: Option<String>,
}

/// Change password payload (`POST /api/auth/cambiar-password`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordChange {
    pub password_actual: Option<String>,
    pub password_nueva: Option<String>,
}

use async_trait::async_trait;
use shared::models::{Role, User};
use sqlx::PgPool;

use super::{NewUser, RepoError, RepoResult, UserRepository};

const USER_COLUMNS: &str = "id_usuario, nombre, usuario, password, rol, id_tienda, activo, debe_cambiar_password";

/// `usuarios` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_login(&self, usuario: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE usuario = $1 LIMIT 1"
        ))
        .bind(usuario)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id_usuario: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE id_usuario = $1"
        ))
        .bind(id_usuario)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, data: NewUser) -> RepoResult<User> {
        let user = sqlx::query_as(&format!(
            "INSERT INTO usuarios (nombre, usuario, password, rol, id_tienda, activo, debe_cambiar_password)
             VALUES ($1, $2, $3, $4, $5, TRUE, TRUE)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&data.nombre)
        .bind(&data.usuario)
        .bind(&data.password_hash)
        .bind(data.rol.as_str())
        .bind(data.id_tienda)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_password(&self, id_usuario: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE usuarios SET password = $1, debe_cambiar_password = FALSE WHERE id_usuario = $2",
        )
        .bind(password_hash)
        .bind(id_usuario)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("usuario {id_usuario}")));
        }
        Ok(())
    }

    async fn promote_to_admin(&self, id_usuario: i64) -> RepoResult<User> {
        sqlx::query_as(&format!(
            "UPDATE usuarios SET rol = $1, id_tienda = NULL WHERE id_usuario = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Role::Admin.as_str())
        .bind(id_usuario)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("usuario {id_usuario}")))
    }
}

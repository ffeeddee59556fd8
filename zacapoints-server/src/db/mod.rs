//! Database access layer
//!
//! Repository traits with PostgreSQL implementations. Services only see the
//! traits, so tests run against the in-memory versions in `memory`.

pub mod reports;
pub mod stores;
pub mod users;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{DailyReport, NewDailyReport, Role, Store, User};
use thiserror::Error;

pub use reports::PgReportRepository;
pub use stores::PgStoreRepository;
pub use users::PgUserRepository;

/// Unique constraint guarding one capture per store, date and shift
pub const CAPTURE_UNIQUE_KEY: &str = "reportes_diarios_captura_key";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation (constraint name)
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.constraint().unwrap_or_default().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => {
                AppError::new(ErrorCode::NotFound).with_detail("resource", what)
            }
            RepoError::Duplicate(_) => AppError::new(ErrorCode::AlreadyExists),
            RepoError::Database(msg) => {
                // Raw database text stays in the server log
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Data for a new user row (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nombre: String,
    pub usuario: String,
    pub password_hash: String,
    pub rol: Role,
    pub id_tienda: Option<i64>,
}

/// Conjunctive report filter; `None` means "no constraint"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub fecha: Option<NaiveDate>,
    pub id_tienda: Option<i64>,
    /// Inclusive lower bound
    pub desde: Option<NaiveDate>,
    /// Inclusive upper bound
    pub hasta: Option<NaiveDate>,
}

impl ReportFilter {
    /// Whether `r` passes every constraint
    pub fn matches(&self, r: &DailyReport) -> bool {
        self.fecha.is_none_or(|f| r.fecha == f)
            && self.id_tienda.is_none_or(|t| r.id_tienda == t)
            && self.desde.is_none_or(|d| r.fecha >= d)
            && self.hasta.is_none_or(|h| r.fecha <= h)
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact login-name match
    async fn find_by_login(&self, usuario: &str) -> RepoResult<Option<User>>;
    async fn find_by_id(&self, id_usuario: i64) -> RepoResult<Option<User>>;
    /// Insert with `debe_cambiar_password = true`; taken login is `Duplicate`
    async fn create(&self, data: NewUser) -> RepoResult<User>;
    /// Replace the hash and clear the must-change flag
    async fn update_password(&self, id_usuario: i64, password_hash: &str) -> RepoResult<()>;
    /// Set role ADMIN and clear the store binding
    async fn promote_to_admin(&self, id_usuario: i64) -> RepoResult<User>;
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Active stores ordered by id
    async fn list_active(&self) -> RepoResult<Vec<Store>>;
    async fn find_active(&self, id_tienda: i64) -> RepoResult<Option<Store>>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert one capture; an existing (store, date, shift) is `Duplicate`
    async fn insert(&self, report: NewDailyReport) -> RepoResult<DailyReport>;
    async fn find_capture(
        &self,
        id_tienda: i64,
        fecha: NaiveDate,
        turno: i16,
    ) -> RepoResult<Option<DailyReport>>;
    /// Rows matching `filter`, ordered by date desc, store asc, shift asc
    async fn list(&self, filter: &ReportFilter) -> RepoResult<Vec<DailyReport>>;
}

//! Application state

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::auth::{JwtService, PasswordHasher};
use crate::config::Config;
use crate::db::{
    PgReportRepository, PgStoreRepository, PgUserRepository, ReportRepository, StoreRepository,
    UserRepository,
};
use crate::shifts::{Clock, ShiftResolver, SystemClock};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Session token service
    pub jwt: JwtService,
    /// bcrypt with the configured cost
    pub hasher: PasswordHasher,
    /// Business date and shift resolver
    pub shifts: ShiftResolver,
    pub users: Arc<dyn UserRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

/// Repository set behind the state
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations, wire the production state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let repos = Repositories {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            stores: Arc::new(PgStoreRepository::new(pool.clone())),
            reports: Arc::new(PgReportRepository::new(pool)),
        };

        Ok(Self::with_parts(config.clone(), repos, Arc::new(SystemClock)))
    }

    /// Assemble state from explicit parts (tests inject fakes here)
    pub fn with_parts(config: Config, repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            jwt: JwtService::new(&config.jwt_secret, config.jwt_expiration_hours),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            shifts: ShiftResolver::new(config.timezone, clock),
            users: repos.users,
            stores: repos.stores,
            reports: repos.reports,
            config: Arc::new(config),
        }
    }
}

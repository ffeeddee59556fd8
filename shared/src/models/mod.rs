//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGINT).

pub mod daily_report;
pub mod role;
pub mod shift;
pub mod store;
pub mod summary;
pub mod user;

// Re-exports
pub use daily_report::*;
pub use role::*;
pub use shift::*;
pub use store::*;
pub use summary::*;
pub use user::*;

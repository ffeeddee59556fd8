//! Shared types for the Zacapoints reporting backend
//!
//! Wire and domain types used by the server and by any Rust client:
//! the unified error system, the data models, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};

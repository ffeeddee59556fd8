//! zacapoints-server - shift reporting backend for a chain of stores
//!
//! - Stores authenticate and capture cash, transfer and card totals per shift
//! - Administrators review per-store daily and monthly summaries
//! - Shift windows are resolved in a single business time zone

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod logger;
pub mod services;
pub mod shifts;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use state::AppState;

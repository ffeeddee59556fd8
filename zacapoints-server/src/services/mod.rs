//! Business services
//!
//! Free functions over [`crate::AppState`]; handlers stay thin and only
//! translate HTTP in and out.

pub mod auth;
pub mod capture;
pub mod reports;

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;

/// Trimmed, non-empty value of an optional text field
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Required text field (missing or blank is `RequiredField`)
pub(crate) fn require_text(value: Option<&str>, field: &str) -> AppResult<String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| AppError::required(field))
}

/// Parse a civil date in `YYYY-MM-DD` form
pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid_format(field, value))
}

/// Parse a positive integer id
pub(crate) fn parse_id(field: &str, value: &str) -> AppResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid_format(field, value))
}

/// Optional positive id given as text (query strings); blank means absent
pub(crate) fn optional_id(field: &str, value: Option<&str>) -> AppResult<Option<i64>> {
    non_empty(value).map(|v| parse_id(field, v)).transpose()
}

/// Store bound to a TIENDA identity
pub(crate) fn own_store(user: &CurrentUser) -> AppResult<i64> {
    user.id_tienda
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::new(ErrorCode::StoreUnassigned))
}

//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type of the backend:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages (sent to clients as `mensaje`)
/// - Optional structured details (e.g. the offending field name)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a missing-field error naming the field
    pub fn required(field: &str) -> Self {
        Self::with_message(
            ErrorCode::RequiredField,
            format!("Falta el campo obligatorio: {field}"),
        )
        .with_detail("campo", field)
    }

    /// Create an invalid format error naming the field
    pub fn invalid_format(field: &str, value: &str) -> Self {
        Self::with_message(
            ErrorCode::InvalidFormat,
            format!("Formato inválido en {field}: {value}"),
        )
        .with_detail("campo", field)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Unified API response envelope
///
/// Success: `{"ok": true, "mensaje"?: ..., <payload fields>}`
/// Failure: `{"ok": false, "code": 4001, "mensaje": ..., "details"?: {...}}`
///
/// The payload is flattened into the top-level object, so `T` must
/// serialize as a map (a struct or a JSON object).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    /// Machine-readable error code (failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    /// Additional error details (failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
    /// Response payload (success only)
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            code: None,
            mensaje: None,
            details: None,
            data: Some(data),
        }
    }

    /// Create a success response with a message and data
    pub fn success_with_message(mensaje: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            code: None,
            mensaje: Some(mensaje.into()),
            details: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response carrying only a message
    pub fn ok(mensaje: impl Into<String>) -> Self {
        Self {
            ok: true,
            code: None,
            mensaje: Some(mensaje.into()),
            details: None,
            data: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            ok: false,
            code: Some(err.code),
            mensaje: Some(err.message.clone()),
            details: err.details.clone(),
            data: None,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // System errors are logged where they originate, with the raw cause
        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.ok {
            StatusCode::OK
        } else {
            self.code
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

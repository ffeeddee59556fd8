//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Store errors
//! - 4xxx: Report capture errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so clients can branch on a stable,
/// machine-readable value instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request (malformed body or query)
    InvalidRequest = 5,
    /// Invalid format (dates, ids)
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// No identity attached to the request
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// New password is too short
    PasswordTooShort = 1008,
    /// Login name already in use
    UsernameTaken = 1009,
    /// Role is not one of ADMIN / TIENDA
    InvalidRole = 1010,
    /// User row missing after authentication
    UserNotFound = 1011,

    // ==================== 2xxx: Permission ====================
    /// Specific role required
    RoleRequired = 2002,
    /// Only the bootstrap account may perform this action
    BootstrapOnly = 2004,
    /// Store-bound user has no store assigned
    StoreUnassigned = 2005,

    // ==================== 3xxx: Store ====================
    /// Store id is required
    StoreRequired = 3001,
    /// Store does not exist or is inactive
    StoreNotFound = 3002,

    // ==================== 4xxx: Report capture ====================
    /// A capture already exists for this store/date/shift
    ReportAlreadyCaptured = 4001,
    /// Current time is outside both shifts
    OutsideOperatingHours = 4002,
    /// Capture date is later than today
    FutureDate = 4003,
    /// Shift must be given explicitly (1 or 2) for past dates
    ShiftRequired = 4004,
    /// Monetary field is negative
    NegativeAmount = 4005,
    /// Monetary field is not a finite number
    InvalidAmount = 4006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Stored password is not in the expected hashed format
    PasswordHashInvalid = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default client-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operación exitosa",
            ErrorCode::ValidationFailed => "Datos inválidos",
            ErrorCode::NotFound => "Recurso no encontrado",
            ErrorCode::AlreadyExists => "El recurso ya existe",
            ErrorCode::InvalidRequest => "Solicitud inválida",
            ErrorCode::InvalidFormat => "Formato inválido",
            ErrorCode::RequiredField => "Faltan datos obligatorios",
            ErrorCode::ValueOutOfRange => "Valor fuera de rango",

            // Auth
            ErrorCode::NotAuthenticated => "No autenticado",
            ErrorCode::InvalidCredentials => "Usuario o password incorrectos",
            ErrorCode::TokenExpired => "Token inválido o expirado",
            ErrorCode::TokenInvalid => "Token inválido o expirado",
            ErrorCode::AccountDisabled => "Usuario desactivado",
            ErrorCode::PasswordTooShort => "La nueva contraseña debe tener al menos 4 caracteres",
            ErrorCode::UsernameTaken => "El usuario ya existe",
            ErrorCode::InvalidRole => "Rol inválido (ADMIN o TIENDA)",
            ErrorCode::UserNotFound => "Usuario no encontrado",

            // Permission
            ErrorCode::RoleRequired => "Acceso denegado. Rol insuficiente",
            ErrorCode::BootstrapOnly => "Solo la cuenta inicial puede realizar esta acción",
            ErrorCode::StoreUnassigned => "Usuario sin tienda asignada",

            // Store
            ErrorCode::StoreRequired => "Falta id_tienda",
            ErrorCode::StoreNotFound => "La tienda no existe o está inactiva",

            // Report capture
            ErrorCode::ReportAlreadyCaptured => "Ya existe captura para este turno",
            ErrorCode::OutsideOperatingHours => "Fuera de horario (08:00 a 23:00)",
            ErrorCode::FutureDate => "No se permite capturar una fecha futura",
            ErrorCode::ShiftRequired => "Para fechas pasadas debes indicar turno 1 o 2",
            ErrorCode::NegativeAmount => "No se permiten montos negativos",
            ErrorCode::InvalidAmount => "Monto inválido",

            // System
            ErrorCode::InternalError => "Error interno del servidor",
            ErrorCode::DatabaseError => "Error de base de datos",
            ErrorCode::PasswordHashInvalid => "Error interno del servidor",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::PasswordTooShort),
            1009 => Ok(ErrorCode::UsernameTaken),
            1010 => Ok(ErrorCode::InvalidRole),
            1011 => Ok(ErrorCode::UserNotFound),

            // Permission
            2002 => Ok(ErrorCode::RoleRequired),
            2004 => Ok(ErrorCode::BootstrapOnly),
            2005 => Ok(ErrorCode::StoreUnassigned),

            // Store
            3001 => Ok(ErrorCode::StoreRequired),
            3002 => Ok(ErrorCode::StoreNotFound),

            // Report capture
            4001 => Ok(ErrorCode::ReportAlreadyCaptured),
            4002 => Ok(ErrorCode::OutsideOperatingHours),
            4003 => Ok(ErrorCode::FutureDate),
            4004 => Ok(ErrorCode::ShiftRequired),
            4005 => Ok(ErrorCode::NegativeAmount),
            4006 => Ok(ErrorCode::InvalidAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9006 => Ok(ErrorCode::PasswordHashInvalid),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

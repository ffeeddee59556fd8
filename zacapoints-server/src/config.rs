//! Server configuration

use chrono_tz::Tz;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, built once at startup and passed to [`crate::AppState`]
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Max pooled connections
    pub database_max_connections: u32,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Session token validity (hours)
    pub jwt_expiration_hours: i64,
    /// Civil time zone used for business dates and shifts
    pub timezone: Tz,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// The only account allowed to call `fijar-admin`
    pub bootstrap_admin_id: i64,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON log lines instead of human-readable output
    pub log_json: bool,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, using development fallback");
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let tz_name =
            std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "America/Mexico_City".into());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| format!("BUSINESS_TIMEZONE is not a valid IANA zone: {tz_name}"))?;

        let bcrypt_cost = Self::parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(format!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}").into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            database_max_connections: Self::parse_or("DATABASE_MAX_CONNECTIONS", 5),
            http_port: Self::parse_or("HTTP_PORT", 3000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiration_hours: Self::parse_or("JWT_EXPIRATION_HOURS", 12),
            timezone,
            bcrypt_cost,
            bootstrap_admin_id: Self::parse_or("BOOTSTRAP_ADMIN_ID", 1),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for in-process tests (cheap hashing, fixed zone)
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://unused".into(),
            database_max_connections: 1,
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "test-secret-with-enough-length-for-hs256".into(),
            jwt_expiration_hours: 12,
            timezone: chrono_tz::America::Mexico_City,
            bcrypt_cost: 4,
            bootstrap_admin_id: 1,
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

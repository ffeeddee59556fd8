//! Logging Infrastructure
//!
//! Console output (pretty or JSON) plus optional daily rolling files:
//! - `app`: everything except the audit and security targets
//! - `audit`: business operations (`audit_log!`)
//! - `security`: authentication and authorization events (`security_log!`)

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor a level override is given
pub const DEFAULT_FILTER: &str = "zacapoints_server=info,tower_http=info";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if level.eq_ignore_ascii_case("info") {
            EnvFilter::new(DEFAULT_FILTER)
        } else {
            EnvFilter::new(format!("zacapoints_server={level},tower_http={level}"))
        }
    })
}

fn file_layer<S>(
    dir: &Path,
    prefix: &str,
    json: bool,
    keep: fn(&str) -> bool,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let appender = RollingFileAppender::new(Rotation::DAILY, dir.join(prefix), prefix);
    let filter = tracing_subscriber::filter::filter_fn(move |meta| keep(meta.target()));
    let base = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));
    if json {
        base.json().with_filter(filter).boxed()
    } else {
        base.with_filter(filter).boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines (production) instead of pretty output
/// * `log_dir` - Optional directory for rolling `app`/`audit`/`security` files
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let console = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let files = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            for sub in ["app", "audit", "security"] {
                fs::create_dir_all(dir.join(sub))?;
            }
            vec![
                file_layer(dir, "app", json_format, |t| t != "audit" && t != "security"),
                file_layer(dir, "audit", json_format, |t| t == "audit"),
                file_layer(dir, "security", json_format, |t| t == "security"),
            ]
        }
        None => Vec::new(),
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console)
        .with(files)
        .try_init()?;

    Ok(())
}

/// Audit log helper - records business operations
///
/// # Examples
/// ```ignore
/// audit_log!(user.id_usuario, "create_user", "usuario:carlos");
/// audit_log!(user.id_usuario, "capture", "reporte:42", "tienda 3 turno 1");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}

/// Security log helper - records authentication and authorization events
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "login_failed", usuario = "carlos", reason = "bad_password");
/// security_log!(WARN, "role_denied", user_id = 7, required = "ADMIN");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "security",
            event = $event,
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            $($arg)*
        );
    };
}

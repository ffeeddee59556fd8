//! Shift capture
//!
//! One report per store, business date and shift. The database constraint
//! decides races: the loser of two concurrent submissions sees a duplicate
//! and gets `ReportAlreadyCaptured`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AMOUNT_FIELDS, CaptureAmounts, DailyReport, NewDailyReport, Role, Shift};
use shared::util::round_money;

use super::{own_store, parse_date};
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::db::RepoError;
use crate::state::AppState;

/// Capture payload as sent by clients
///
/// Amounts stay raw JSON until validated so a bad field can be named.
/// A client-supplied `total` lands in `campos` and is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureRequest {
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub turno: Option<Value>,
    #[serde(default)]
    pub id_tienda: Option<Value>,
    #[serde(flatten)]
    pub campos: Map<String, Value>,
}

/// Stored capture summary returned to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureReceipt {
    pub id_reporte: i64,
    pub fecha: NaiveDate,
    pub turno: i16,
    pub id_tienda: i64,
    pub total: f64,
}

/// Editable form for today's shift (stored row or zero template)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureForm {
    /// `None` for a template
    pub id_reporte: Option<i64>,
    pub fecha: NaiveDate,
    pub turno: i16,
    pub id_tienda: i64,
    #[serde(flatten)]
    pub montos: CaptureAmounts,
    pub total: f64,
}

impl From<DailyReport> for CaptureForm {
    fn from(r: DailyReport) -> Self {
        Self {
            id_reporte: Some(r.id_reporte),
            fecha: r.fecha,
            turno: r.turno,
            id_tienda: r.id_tienda,
            montos: r.amounts(),
            total: r.total,
        }
    }
}

/// Today's capture state for a store user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayCapture {
    pub fecha: NaiveDate,
    pub turno: i16,
    pub fuera_de_horario: bool,
    pub capturado: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    pub data: Option<CaptureForm>,
}

/// Loose integer: JSON number or numeric string; null/blank is absent
fn loose_int(value: Option<&Value>) -> Option<Option<i64>> {
    match value {
        None | Some(Value::Null) => Some(None),
        Some(Value::Number(n)) => n.as_i64().map(Some),
        Some(Value::String(s)) if s.trim().is_empty() => Some(None),
        Some(Value::String(s)) => s.trim().parse().ok().map(Some),
        Some(_) => None,
    }
}

/// Parse one monetary field: absent/null is 0, must be finite and >= 0
///
/// The result is rounded to cents so stored amounts are exactly what gets summed.
fn parse_amount(field: &str, value: Option<&Value>) -> AppResult<f64> {
    let invalid = || {
        AppError::with_message(ErrorCode::InvalidAmount, format!("Campo inválido: {field}"))
            .with_detail("campo", field)
    };

    let amount = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    if !amount.is_finite() {
        return Err(invalid());
    }
    if amount < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::NegativeAmount,
            format!("No se permite negativo: {field}"),
        )
        .with_detail("campo", field));
    }
    round_money(amount).ok_or_else(invalid)
}

/// Validate every monetary field in order; the first bad one is reported
pub fn validate_amounts(campos: &Map<String, Value>) -> AppResult<CaptureAmounts> {
    let mut values = [0.0; 7];
    for (slot, field) in values.iter_mut().zip(AMOUNT_FIELDS) {
        *slot = parse_amount(field, campos.get(field))?;
    }
    Ok(CaptureAmounts::from_ordered(values))
}

/// Store the capture targets
async fn resolve_store(
    state: &AppState,
    current: &CurrentUser,
    requested: Option<&Value>,
) -> AppResult<i64> {
    match current.rol {
        // Store users always capture for their own store
        Role::Tienda => own_store(current),
        Role::Admin => {
            let id = loose_int(requested)
                .ok_or_else(|| AppError::invalid_format("id_tienda", &value_text(requested)))?
                .filter(|id| *id > 0)
                .ok_or_else(|| AppError::new(ErrorCode::StoreRequired))?;
            if state.stores.find_active(id).await?.is_none() {
                return Err(AppError::new(ErrorCode::StoreNotFound).with_detail("id_tienda", id));
            }
            Ok(id)
        }
    }
}

fn value_text(value: Option<&Value>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Explicit shift for a past date (1 or 2)
fn explicit_shift(value: Option<&Value>) -> AppResult<Shift> {
    loose_int(value)
        .flatten()
        .and_then(|n| i16::try_from(n).ok())
        .and_then(Shift::from_number)
        .filter(Shift::is_open)
        .ok_or_else(|| AppError::new(ErrorCode::ShiftRequired))
}

/// Validate and store one shift capture
pub async fn submit_daily_report(
    state: &AppState,
    current: &CurrentUser,
    req: CaptureRequest,
) -> AppResult<CaptureReceipt> {
    let id_tienda = resolve_store(state, current, req.id_tienda.as_ref()).await?;

    let now = state.shifts.current();
    let fecha = match req.fecha.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(text) => parse_date("fecha", text)?,
        None => now.fecha,
    };
    if fecha > now.fecha {
        return Err(AppError::new(ErrorCode::FutureDate)
            .with_detail("fecha", fecha.to_string())
            .with_detail("hoy", now.fecha.to_string()));
    }

    let turno = if fecha == now.fecha {
        if !now.turno.is_open() {
            return Err(AppError::new(ErrorCode::OutsideOperatingHours));
        }
        now.turno
    } else {
        explicit_shift(req.turno.as_ref())?
    };

    let amounts = validate_amounts(&req.campos)?;

    let row = NewDailyReport::new(fecha, turno.number(), id_tienda, current.id_usuario, amounts);
    let stored = state.reports.insert(row).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::ReportAlreadyCaptured)
            .with_detail("id_tienda", id_tienda)
            .with_detail("fecha", fecha.to_string())
            .with_detail("turno", turno.number()),
        other => other.into(),
    })?;

    audit_log!(
        current.id_usuario,
        "capture",
        format!("reporte:{}", stored.id_reporte),
        format!("tienda={} fecha={} turno={}", id_tienda, fecha, stored.turno)
    );

    Ok(CaptureReceipt {
        id_reporte: stored.id_reporte,
        fecha: stored.fecha,
        turno: stored.turno,
        id_tienda: stored.id_tienda,
        total: stored.total,
    })
}

/// Today's shift for the caller's store: stored row, zero template, or
/// "outside hours" (not an error)
pub async fn today_capture(state: &AppState, current: &CurrentUser) -> AppResult<TodayCapture> {
    let id_tienda = own_store(current)?;
    let now = state.shifts.current();

    if !now.turno.is_open() {
        return Ok(TodayCapture {
            fecha: now.fecha,
            turno: Shift::Closed.number(),
            fuera_de_horario: true,
            capturado: false,
            mensaje: Some(ErrorCode::OutsideOperatingHours.message().to_string()),
            data: None,
        });
    }

    let turno = now.turno.number();
    let existing = state
        .reports
        .find_capture(id_tienda, now.fecha, turno)
        .await?;

    let (capturado, data) = match existing {
        Some(row) => (true, CaptureForm::from(row)),
        None => (
            false,
            CaptureForm {
                id_reporte: None,
                fecha: now.fecha,
                turno,
                id_tienda,
                montos: CaptureAmounts::default(),
                total: 0.0,
            },
        ),
    };

    Ok(TodayCapture {
        fecha: now.fecha,
        turno,
        fuera_de_horario: false,
        capturado,
        mensaje: None,
        data: Some(data),
    })
}

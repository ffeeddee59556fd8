//! Daily Report Model (reportes diarios)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{to_decimal, to_f64};

/// Monetary fields of a capture, in payload order
pub const AMOUNT_FIELDS: [&str; 7] = [
    "efectivo",
    "transferencia",
    "terminal1",
    "terminal2",
    "gastos",
    "retiro",
    "fondo_inicial",
];

/// One captured shift of one store
///
/// Unique per (`id_tienda`, `fecha`, `turno`). `total` is computed once at
/// insert and stored with the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailyReport {
    pub id_reporte: i64,
    /// Civil business date (YYYY-MM-DD)
    pub fecha: NaiveDate,
    /// 1 = morning, 2 = evening
    pub turno: i16,
    pub id_tienda: i64,
    /// Submitting user
    pub id_usuario: i64,
    pub efectivo: f64,
    pub transferencia: f64,
    pub terminal1: f64,
    pub terminal2: f64,
    pub gastos: f64,
    pub retiro: f64,
    pub fondo_inicial: f64,
    pub total: f64,
    pub fecha_registro: DateTime<Utc>,
}

impl DailyReport {
    pub fn amounts(&self) -> CaptureAmounts {
        CaptureAmounts {
            efectivo: self.efectivo,
            transferencia: self.transferencia,
            terminal1: self.terminal1,
            terminal2: self.terminal2,
            gastos: self.gastos,
            retiro: self.retiro,
            fondo_inicial: self.fondo_inicial,
        }
    }
}

/// Validated monetary amounts of a capture (all finite, non-negative)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureAmounts {
    pub efectivo: f64,
    pub transferencia: f64,
    pub terminal1: f64,
    pub terminal2: f64,
    pub gastos: f64,
    pub retiro: f64,
    pub fondo_inicial: f64,
}

impl CaptureAmounts {
    /// Build from values given in [`AMOUNT_FIELDS`] order
    pub fn from_ordered(values: [f64; 7]) -> Self {
        let [efectivo, transferencia, terminal1, terminal2, gastos, retiro, fondo_inicial] = values;
        Self {
            efectivo,
            transferencia,
            terminal1,
            terminal2,
            gastos,
            retiro,
            fondo_inicial,
        }
    }

    /// efectivo + transferencia + terminal1 + terminal2 - gastos - retiro
    ///
    /// The opening float is recorded but not part of the total.
    pub fn total(&self) -> f64 {
        let income: Decimal = [
            self.efectivo,
            self.transferencia,
            self.terminal1,
            self.terminal2,
        ]
        .into_iter()
        .map(to_decimal)
        .sum();
        to_f64(income - to_decimal(self.gastos) - to_decimal(self.retiro))
    }
}

/// Row to insert for a new capture
#[derive(Debug, Clone, PartialEq)]
pub struct NewDailyReport {
    pub fecha: NaiveDate,
    pub turno: i16,
    pub id_tienda: i64,
    pub id_usuario: i64,
    pub amounts: CaptureAmounts,
    pub total: f64,
}

impl NewDailyReport {
    pub fn new(
        fecha: NaiveDate,
        turno: i16,
        id_tienda: i64,
        id_usuario: i64,
        amounts: CaptureAmounts,
    ) -> Self {
        Self {
            fecha,
            turno,
            id_tienda,
            id_usuario,
            total: amounts.total(),
            amounts,
        }
    }
}

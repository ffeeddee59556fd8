//! Report aggregation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::daily_report::DailyReport;
use crate::util::{to_decimal, to_f64};

/// Column sums over a set of reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub efectivo: f64,
    pub transferencia: f64,
    pub terminal1: f64,
    pub terminal2: f64,
    pub gastos: f64,
    pub retiro: f64,
    pub fondo_inicial: f64,
    pub total: f64,
}

/// Decimal accumulator behind [`ReportTotals`]
#[derive(Debug, Clone, Copy, Default)]
struct TotalsAcc {
    efectivo: Decimal,
    transferencia: Decimal,
    terminal1: Decimal,
    terminal2: Decimal,
    gastos: Decimal,
    retiro: Decimal,
    fondo_inicial: Decimal,
    total: Decimal,
}

impl TotalsAcc {
    fn add(&mut self, t: &ReportTotals) {
        self.efectivo += to_decimal(t.efectivo);
        self.transferencia += to_decimal(t.transferencia);
        self.terminal1 += to_decimal(t.terminal1);
        self.terminal2 += to_decimal(t.terminal2);
        self.gastos += to_decimal(t.gastos);
        self.retiro += to_decimal(t.retiro);
        self.fondo_inicial += to_decimal(t.fondo_inicial);
        self.total += to_decimal(t.total);
    }

    fn finish(self) -> ReportTotals {
        ReportTotals {
            efectivo: to_f64(self.efectivo),
            transferencia: to_f64(self.transferencia),
            terminal1: to_f64(self.terminal1),
            terminal2: to_f64(self.terminal2),
            gastos: to_f64(self.gastos),
            retiro: to_f64(self.retiro),
            fondo_inicial: to_f64(self.fondo_inicial),
            total: to_f64(self.total),
        }
    }
}

impl ReportTotals {
    pub fn of_report(r: &DailyReport) -> Self {
        Self {
            efectivo: r.efectivo,
            transferencia: r.transferencia,
            terminal1: r.terminal1,
            terminal2: r.terminal2,
            gastos: r.gastos,
            retiro: r.retiro,
            fondo_inicial: r.fondo_inicial,
            total: r.total,
        }
    }

    /// Sum exactly the given rows
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a DailyReport>,
    {
        Self::sum(reports.into_iter().map(Self::of_report))
    }

    /// Grand total of per-store rows
    pub fn from_summaries<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a StoreSummary>,
    {
        Self::sum(rows.into_iter().map(|s| s.totales))
    }

    fn sum<I: IntoIterator<Item = ReportTotals>>(items: I) -> Self {
        let mut acc = TotalsAcc::default();
        for item in items {
            acc.add(&item);
        }
        acc.finish()
    }
}

/// One store's row in a monthly or daily summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub id_tienda: i64,
    pub tienda: String,
    /// Number of captured shifts in the period
    pub capturas: i64,
    #[serde(flatten)]
    pub totales: ReportTotals,
}

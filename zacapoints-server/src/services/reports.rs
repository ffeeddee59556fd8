//! Report listing and per-store summaries
//!
//! Sums are computed here over the exact rows returned, never in SQL, so the
//! totals always match the listed set.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DailyReport, ReportTotals, Role, Store, StoreSummary};

use super::{non_empty, optional_id, own_store, parse_date};
use crate::auth::CurrentUser;
use crate::db::ReportFilter;
use crate::state::AppState;

const MONTH_REQUIRED: &str = "Debes enviar anio y mes. Ej: ?anio=2026&mes=2";

/// Raw query string of `GET /api/reportes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub fecha: Option<String>,
    pub id_tienda: Option<String>,
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub anio: Option<String>,
    pub mes: Option<String>,
}

/// Raw query string of `GET /api/reportes/resumen-mes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub anio: Option<String>,
    pub mes: Option<String>,
}

/// Raw query string of `GET /api/reportes/resumen-dia`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayQuery {
    pub fecha: Option<String>,
}

/// Filters as applied (after parsing and scoping)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListFilters {
    pub fecha: Option<NaiveDate>,
    pub id_tienda: Option<i64>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub anio: Option<i32>,
    pub mes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportList {
    pub filtros: ListFilters,
    pub registros: usize,
    pub totales: ReportTotals,
    pub data: Vec<DailyReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthFilters {
    pub anio: i32,
    pub mes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayFilters {
    pub fecha: NaiveDate,
}

/// Per-store summary with a grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary<F> {
    pub filtros: F,
    pub totales: ReportTotals,
    pub tiendas: Vec<StoreSummary>,
}

fn parse_year(value: &str) -> AppResult<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_format("anio", value))
}

fn parse_month(value: &str) -> AppResult<u32> {
    let mes: u32 = value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_format("mes", value))?;
    if !(1..=12).contains(&mes) {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "mes debe estar entre 1 y 12")
                .with_detail("mes", mes),
        );
    }
    Ok(mes)
}

/// First and last civil day of a month
pub fn month_range(anio: i32, mes: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(anio, mes, 1)
        .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange).with_detail("anio", anio))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange).with_detail("anio", anio))?;
    Ok((first, last))
}

/// Tighter of two optional bounds
fn tighten(
    current: Option<NaiveDate>,
    bound: NaiveDate,
    pick: fn(NaiveDate, NaiveDate) -> NaiveDate,
) -> NaiveDate {
    current.map_or(bound, |c| pick(c, bound))
}

/// TIENDA callers only ever see their own store
fn scope_store(current: &CurrentUser, requested: Option<i64>) -> AppResult<Option<i64>> {
    match current.rol {
        Role::Admin => Ok(requested),
        Role::Tienda => own_store(current).map(Some),
    }
}

/// Filtered rows plus their column sums
pub async fn list_reports(
    state: &AppState,
    current: &CurrentUser,
    query: ListQuery,
) -> AppResult<ReportList> {
    let fecha = non_empty(query.fecha.as_deref())
        .map(|v| parse_date("fecha", v))
        .transpose()?;
    let requested = optional_id("id_tienda", query.id_tienda.as_deref())?;
    let mut desde = non_empty(query.desde.as_deref())
        .map(|v| parse_date("desde", v))
        .transpose()?;
    let mut hasta = non_empty(query.hasta.as_deref())
        .map(|v| parse_date("hasta", v))
        .transpose()?;

    let (anio, mes) = match (non_empty(query.anio.as_deref()), non_empty(query.mes.as_deref())) {
        (None, None) => (None, None),
        (Some(a), Some(m)) => (Some(parse_year(a)?), Some(parse_month(m)?)),
        _ => return Err(AppError::with_message(ErrorCode::ValidationFailed, MONTH_REQUIRED)),
    };
    if let (Some(a), Some(m)) = (anio, mes) {
        let (first, last) = month_range(a, m)?;
        desde = Some(tighten(desde, first, NaiveDate::max));
        hasta = Some(tighten(hasta, last, NaiveDate::min));
    }

    let id_tienda = scope_store(current, requested)?;
    let filter = ReportFilter {
        fecha,
        id_tienda,
        desde,
        hasta,
    };
    let data = state.reports.list(&filter).await?;

    Ok(ReportList {
        filtros: ListFilters {
            fecha,
            id_tienda,
            desde,
            hasta,
            anio,
            mes,
        },
        registros: data.len(),
        totales: ReportTotals::from_reports(&data),
        data,
    })
}

/// One row per store, zero-defaulted when it filed nothing
fn summarize(stores: Vec<Store>, rows: &[DailyReport]) -> Vec<StoreSummary> {
    let mut by_store: HashMap<i64, Vec<&DailyReport>> = HashMap::new();
    for row in rows {
        by_store.entry(row.id_tienda).or_default().push(row);
    }

    stores
        .into_iter()
        .map(|store| {
            let own = by_store.remove(&store.id_tienda).unwrap_or_default();
            StoreSummary {
                id_tienda: store.id_tienda,
                tienda: store.nombre,
                capturas: own.len() as i64,
                totales: ReportTotals::from_reports(own),
            }
        })
        .collect()
}

async fn summary_between<F>(
    state: &AppState,
    current: &CurrentUser,
    filtros: F,
    desde: NaiveDate,
    hasta: NaiveDate,
) -> AppResult<Summary<F>> {
    let scoped = scope_store(current, None)?;
    let stores: Vec<Store> = state
        .stores
        .list_active()
        .await?
        .into_iter()
        .filter(|s| scoped.is_none_or(|id| s.id_tienda == id))
        .collect();

    let filter = ReportFilter {
        fecha: None,
        id_tienda: scoped,
        desde: Some(desde),
        hasta: Some(hasta),
    };
    let rows = state.reports.list(&filter).await?;

    let tiendas = summarize(stores, &rows);
    Ok(Summary {
        filtros,
        totales: ReportTotals::from_summaries(&tiendas),
        tiendas,
    })
}

/// Month totals for every active store (TIENDA: its own store only)
pub async fn month_summary(
    state: &AppState,
    current: &CurrentUser,
    query: MonthQuery,
) -> AppResult<Summary<MonthFilters>> {
    let (Some(anio), Some(mes)) = (non_empty(query.anio.as_deref()), non_empty(query.mes.as_deref()))
    else {
        return Err(AppError::with_message(ErrorCode::RequiredField, MONTH_REQUIRED));
    };
    let anio = parse_year(anio)?;
    let mes = parse_month(mes)?;
    let (first, last) = month_range(anio, mes)?;

    summary_between(state, current, MonthFilters { anio, mes }, first, last).await
}

/// One day's totals for every active store; defaults to today
pub async fn day_summary(
    state: &AppState,
    current: &CurrentUser,
    query: DayQuery,
) -> AppResult<Summary<DayFilters>> {
    let fecha = match non_empty(query.fecha.as_deref()) {
        Some(v) => parse_date("fecha", v)?,
        None => state.shifts.today(),
    };

    summary_between(state, current, DayFilters { fecha }, fecha, fecha).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use shared::models::CaptureAmounts;

    fn amounts(efectivo: f64, transferencia: f64, gastos: f64) -> CaptureAmounts {
        CaptureAmounts {
            efectivo,
            transferencia,
            gastos,
            ..Default::default()
        }
    }

    /// Feb 2026 rows for stores 1 and 3, one March row for store 1
    fn rows() -> Vec<DailyReport> {
        vec![
            report(1, date(2026, 2, 1), 1, 1, amounts(100.0, 0.1, 0.0)),
            report(2, date(2026, 2, 1), 2, 1, amounts(50.0, 0.2, 10.0)),
            report(3, date(2026, 2, 1), 1, 3, amounts(20.0, 0.0, 0.0)),
            report(4, date(2026, 2, 15), 1, 3, amounts(30.5, 0.0, 0.25)),
            report(5, date(2026, 3, 1), 1, 1, amounts(999.0, 0.0, 0.0)),
        ]
    }

    fn ctx() -> TestContext {
        context_with_reports(mexico(2026, 3, 1, 12, 0), rows())
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "fecha" => q.fecha = v,
                "id_tienda" => q.id_tienda = v,
                "desde" => q.desde = v,
                "hasta" => q.hasta = v,
                "anio" => q.anio = v,
                "mes" => q.mes = v,
                _ => unreachable!(),
            }
        }
        q
    }

    #[tokio::test]
    async fn test_list_orders_and_sums_returned_rows() {
        let ctx = ctx();
        let list = list_reports(&ctx.state, &admin(), ListQuery::default())
            .await
            .unwrap();
        let ids: Vec<i64> = list.data.iter().map(|r| r.id_reporte).collect();
        assert_eq!(ids, vec![5, 4, 1, 2, 3]);
        assert_eq!(list.registros, 5);
        assert_eq!(list.totales, ReportTotals::from_reports(&list.data));
        assert_eq!(list.totales.transferencia, 0.3);
    }

    #[tokio::test]
    async fn test_list_month_filter() {
        let ctx = ctx();
        let list = list_reports(&ctx.state, &admin(), query(&[("anio", "2026"), ("mes", "2")]))
            .await
            .unwrap();
        assert_eq!(list.registros, 4);
        assert_eq!(list.filtros.desde, Some(date(2026, 2, 1)));
        assert_eq!(list.filtros.hasta, Some(date(2026, 2, 28)));
        assert_eq!(list.totales.efectivo, 200.5);
    }

    #[tokio::test]
    async fn test_list_month_intersects_range() {
        let ctx = ctx();
        let list = list_reports(
            &ctx.state,
            &admin(),
            query(&[("anio", "2026"), ("mes", "2"), ("desde", "2026-02-10")]),
        )
        .await
        .unwrap();
        let ids: Vec<i64> = list.data.iter().map(|r| r.id_reporte).collect();
        assert_eq!(ids, vec![4]);
    }

    #[tokio::test]
    async fn test_list_single_bound_and_store() {
        let ctx = ctx();
        let list = list_reports(&ctx.state, &admin(), query(&[("hasta", "2026-02-01")]))
            .await
            .unwrap();
        assert_eq!(list.registros, 3);

        let list = list_reports(
            &ctx.state,
            &admin(),
            query(&[("id_tienda", "1"), ("fecha", "2026-02-01")]),
        )
        .await
        .unwrap();
        let ids: Vec<i64> = list.data.iter().map(|r| r.id_reporte).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_list_store_user_sees_own_store_only() {
        let ctx = ctx();
        let list = list_reports(&ctx.state, &tienda_sur(), query(&[("id_tienda", "1")]))
            .await
            .unwrap();
        assert_eq!(list.filtros.id_tienda, Some(3));
        assert!(list.data.iter().all(|r| r.id_tienda == 3));
        assert_eq!(list.registros, 2);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_filters() {
        let ctx = ctx();
        let err = list_reports(&ctx.state, &admin(), query(&[("anio", "2026")]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = list_reports(&ctx.state, &admin(), query(&[("anio", "2026"), ("mes", "13")]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let err = list_reports(&ctx.state, &admin(), query(&[("desde", "ayer")]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let err = list_reports(&ctx.state, &admin(), query(&[("id_tienda", "x")]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn test_month_summary_lists_every_active_store() {
        let ctx = ctx();
        let month = MonthQuery {
            anio: Some("2026".into()),
            mes: Some("2".into()),
        };
        let summary = month_summary(&ctx.state, &admin(), month).await.unwrap();

        let ids: Vec<i64> = summary.tiendas.iter().map(|t| t.id_tienda).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(summary.tiendas[0].capturas, 2);
        assert_eq!(summary.tiendas[0].totales.total, 140.3);
        assert_eq!(summary.tiendas[1].capturas, 0);
        assert_eq!(summary.tiendas[1].totales, ReportTotals::default());
        assert_eq!(summary.tiendas[2].totales.total, 50.25);
        assert_eq!(summary.totales.total, 190.55);
        assert_eq!(summary.filtros, MonthFilters { anio: 2026, mes: 2 });
    }

    #[tokio::test]
    async fn test_month_summary_empty_month_is_all_zero() {
        let ctx = ctx();
        let month = MonthQuery {
            anio: Some("2025".into()),
            mes: Some("7".into()),
        };
        let summary = month_summary(&ctx.state, &admin(), month).await.unwrap();
        assert_eq!(summary.tiendas.len(), 3);
        assert!(summary.tiendas.iter().all(|t| t.capturas == 0));
        assert_eq!(summary.totales, ReportTotals::default());
    }

    #[tokio::test]
    async fn test_month_summary_requires_year_and_month() {
        let ctx = ctx();
        let err = month_summary(
            &ctx.state,
            &admin(),
            MonthQuery {
                anio: Some("2026".into()),
                mes: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, MONTH_REQUIRED);
    }

    #[tokio::test]
    async fn test_month_summary_store_user_gets_own_row() {
        let ctx = ctx();
        let month = MonthQuery {
            anio: Some("2026".into()),
            mes: Some("2".into()),
        };
        let summary = month_summary(&ctx.state, &tienda_sur(), month).await.unwrap();
        assert_eq!(summary.tiendas.len(), 1);
        assert_eq!(summary.tiendas[0].tienda, "Sur");
        assert_eq!(summary.tiendas[0].capturas, 2);
        assert_eq!(summary.totales.total, 50.25);
    }

    #[tokio::test]
    async fn test_day_summary_defaults_to_today() {
        let ctx = ctx();
        let summary = day_summary(&ctx.state, &admin(), DayQuery::default())
            .await
            .unwrap();
        assert_eq!(summary.filtros.fecha, date(2026, 3, 1));
        assert_eq!(summary.tiendas[0].capturas, 1);
        assert_eq!(summary.totales.efectivo, 999.0);

        let summary = day_summary(
            &ctx.state,
            &admin(),
            DayQuery {
                fecha: Some("2026-02-01".into()),
            },
        )
        .await
        .unwrap();
        let counts: Vec<i64> = summary.tiendas.iter().map(|t| t.capturas).collect();
        assert_eq!(counts, vec![2, 0, 1]);
    }

    #[tokio::test]
    async fn test_summaries_skip_inactive_store_rows() {
        let mut with_closed = rows();
        with_closed.push(report(6, date(2026, 2, 1), 1, 4, amounts(500.0, 0.0, 0.0)));
        let ctx = context_with_reports(mexico(2026, 3, 1, 12, 0), with_closed);

        let month = MonthQuery {
            anio: Some("2026".into()),
            mes: Some("2".into()),
        };
        let summary = month_summary(&ctx.state, &admin(), month).await.unwrap();
        let ids: Vec<i64> = summary.tiendas.iter().map(|t| t.id_tienda).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(summary.totales.total, 190.55);
        assert_eq!(summary.totales.efectivo, 200.5);

        let day = DayQuery {
            fecha: Some("2026-02-01".into()),
        };
        let summary = day_summary(&ctx.state, &admin(), day).await.unwrap();
        let ids: Vec<i64> = summary.tiendas.iter().map(|t| t.id_tienda).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(summary.totales.efectivo, 170.0);
        assert_eq!(summary.totales.total, 160.3);
    }

    #[test]
    fn test_month_range() {
        assert_eq!(
            month_range(2024, 2).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_range(2026, 12).unwrap(),
            (date(2026, 12, 1), date(2026, 12, 31))
        );
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{DailyReport, NewDailyReport};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{ReportFilter, ReportRepository, RepoResult};

const REPORT_COLUMNS: &str = "id_reporte, fecha, turno, id_tienda, id_usuario, efectivo, transferencia, \
     terminal1, terminal2, gastos, retiro, fondo_inicial, total, fecha_registro";

/// `reportes_diarios` table
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: NewDailyReport) -> RepoResult<DailyReport> {
        let a = &report.amounts;
        let row = sqlx::query_as(&format!(
            "INSERT INTO reportes_diarios
                (fecha, turno, id_tienda, id_usuario, efectivo, transferencia,
                 terminal1, terminal2, gastos, retiro, fondo_inicial, total)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(report.fecha)
        .bind(report.turno)
        .bind(report.id_tienda)
        .bind(report.id_usuario)
        .bind(a.efectivo)
        .bind(a.transferencia)
        .bind(a.terminal1)
        .bind(a.terminal2)
        .bind(a.gastos)
        .bind(a.retiro)
        .bind(a.fondo_inicial)
        .bind(report.total)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_capture(
        &self,
        id_tienda: i64,
        fecha: NaiveDate,
        turno: i16,
    ) -> RepoResult<Option<DailyReport>> {
        let row = sqlx::query_as(&format!(
            "SELECT {REPORT_COLUMNS} FROM reportes_diarios
             WHERE id_tienda = $1 AND fecha = $2 AND turno = $3"
        ))
        .bind(id_tienda)
        .bind(fecha)
        .bind(turno)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self, filter: &ReportFilter) -> RepoResult<Vec<DailyReport>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {REPORT_COLUMNS} FROM reportes_diarios WHERE TRUE"
        ));
        if let Some(fecha) = filter.fecha {
            qb.push(" AND fecha = ").push_bind(fecha);
        }
        if let Some(id_tienda) = filter.id_tienda {
            qb.push(" AND id_tienda = ").push_bind(id_tienda);
        }
        if let Some(desde) = filter.desde {
            qb.push(" AND fecha >= ").push_bind(desde);
        }
        if let Some(hasta) = filter.hasta {
            qb.push(" AND fecha <= ").push_bind(hasta);
        }
        qb.push(" ORDER BY fecha DESC, id_tienda ASC, turno ASC");

        let rows = qb
            .build_query_as::<DailyReport>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

//! In-memory repositories for tests
//!
//! Same contract as the PostgreSQL versions, including the unique
//! constraints and result ordering.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use shared::models::{DailyReport, NewDailyReport, Role, Store, User};

use super::{
    CAPTURE_UNIQUE_KEY, NewUser, ReportFilter, ReportRepository, RepoError, RepoResult,
    StoreRepository, UserRepository,
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_login(&self, usuario: &str) -> RepoResult<Option<User>> {
        Ok(self.lock().iter().find(|u| u.usuario == usuario).cloned())
    }

    async fn find_by_id(&self, id_usuario: i64) -> RepoResult<Option<User>> {
        Ok(self.lock().iter().find(|u| u.id_usuario == id_usuario).cloned())
    }

    async fn create(&self, data: NewUser) -> RepoResult<User> {
        let mut users = self.lock();
        if users.iter().any(|u| u.usuario == data.usuario) {
            return Err(RepoError::Duplicate("usuarios_usuario_key".into()));
        }
        let user = User {
            id_usuario: users.iter().map(|u| u.id_usuario).max().unwrap_or(0) + 1,
            nombre: data.nombre,
            usuario: data.usuario,
            password: data.password_hash,
            rol: data.rol,
            id_tienda: data.id_tienda,
            activo: true,
            debe_cambiar_password: true,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id_usuario: i64, password_hash: &str) -> RepoResult<()> {
        let mut users = self.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id_usuario == id_usuario)
            .ok_or_else(|| RepoError::NotFound(format!("usuario {id_usuario}")))?;
        user.password = password_hash.to_string();
        user.debe_cambiar_password = false;
        Ok(())
    }

    async fn promote_to_admin(&self, id_usuario: i64) -> RepoResult<User> {
        let mut users = self.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id_usuario == id_usuario)
            .ok_or_else(|| RepoError::NotFound(format!("usuario {id_usuario}")))?;
        user.rol = Role::Admin;
        user.id_tienda = None;
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct MemoryStoreRepository {
    stores: Vec<Store>,
}

impl MemoryStoreRepository {
    pub fn with_stores(stores: Vec<Store>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl StoreRepository for MemoryStoreRepository {
    async fn list_active(&self) -> RepoResult<Vec<Store>> {
        let mut active: Vec<Store> = self.stores.iter().filter(|s| s.activo).cloned().collect();
        active.sort_by_key(|s| s.id_tienda);
        Ok(active)
    }

    async fn find_active(&self, id_tienda: i64) -> RepoResult<Option<Store>> {
        Ok(self
            .stores
            .iter()
            .find(|s| s.activo && s.id_tienda == id_tienda)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryReportRepository {
    rows: Mutex<Vec<DailyReport>>,
}

impl MemoryReportRepository {
    pub fn with_reports(rows: Vec<DailyReport>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportRepository for MemoryReportRepository {
    async fn insert(&self, report: NewDailyReport) -> RepoResult<DailyReport> {
        let mut rows = self.rows.lock().unwrap();
        let taken = rows.iter().any(|r| {
            r.id_tienda == report.id_tienda && r.fecha == report.fecha && r.turno == report.turno
        });
        if taken {
            return Err(RepoError::Duplicate(CAPTURE_UNIQUE_KEY.into()));
        }
        let a = report.amounts;
        let row = DailyReport {
            id_reporte: rows.iter().map(|r| r.id_reporte).max().unwrap_or(0) + 1,
            fecha: report.fecha,
            turno: report.turno,
            id_tienda: report.id_tienda,
            id_usuario: report.id_usuario,
            efectivo: a.efectivo,
            transferencia: a.transferencia,
            terminal1: a.terminal1,
            terminal2: a.terminal2,
            gastos: a.gastos,
            retiro: a.retiro,
            fondo_inicial: a.fondo_inicial,
            total: report.total,
            fecha_registro: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_capture(
        &self,
        id_tienda: i64,
        fecha: NaiveDate,
        turno: i16,
    ) -> RepoResult<Option<DailyReport>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id_tienda == id_tienda && r.fecha == fecha && r.turno == turno)
            .cloned())
    }

    async fn list(&self, filter: &ReportFilter) -> RepoResult<Vec<DailyReport>> {
        let mut rows: Vec<DailyReport> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.fecha
                .cmp(&a.fecha)
                .then(a.id_tienda.cmp(&b.id_tienda))
                .then(a.turno.cmp(&b.turno))
        });
        Ok(rows)
    }
}

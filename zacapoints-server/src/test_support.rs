//! Fixtures shared by unit and router tests

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Mexico_City;
use shared::models::{CaptureAmounts, DailyReport, Role, Store, User};

use crate::auth::CurrentUser;
use crate::config::Config;
use crate::db::memory::{MemoryReportRepository, MemoryStoreRepository, MemoryUserRepository};
use crate::shifts::FixedClock;
use crate::state::{AppState, Repositories};

pub const ADMIN_PASSWORD: &str = "admin123";
pub const STORE_PASSWORD: &str = "tienda123";

pub const ADMIN_ID: i64 = 1;
pub const SUR_USER_ID: i64 = 2;
pub const INACTIVE_USER_ID: i64 = 3;
pub const LEGACY_USER_ID: i64 = 4;
pub const UNBOUND_USER_ID: i64 = 5;
pub const SECOND_ADMIN_ID: i64 = 6;

/// Instant for a wall-clock time in Mexico City
pub fn mexico(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Mexico_City
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store(id_tienda: i64, nombre: &str, activo: bool) -> Store {
    Store {
        id_tienda,
        nombre: nombre.into(),
        activo,
    }
}

/// Stores 1..=3 active, 4 inactive
pub fn stores() -> Vec<Store> {
    vec![
        store(1, "Centro", true),
        store(2, "Norte", true),
        store(3, "Sur", true),
        store(4, "Cerrada", false),
    ]
}

fn user(
    id_usuario: i64,
    usuario: &str,
    password: String,
    rol: Role,
    id_tienda: Option<i64>,
    activo: bool,
) -> User {
    User {
        id_usuario,
        nombre: usuario.to_uppercase(),
        usuario: usuario.into(),
        password,
        rol,
        id_tienda,
        activo,
        debe_cambiar_password: false,
    }
}

pub fn users() -> Vec<User> {
    let hash = |p: &str| bcrypt::hash(p, 4).unwrap();
    vec![
        user(ADMIN_ID, "admin", hash(ADMIN_PASSWORD), Role::Admin, None, true),
        user(SUR_USER_ID, "sur", hash(STORE_PASSWORD), Role::Tienda, Some(3), true),
        user(INACTIVE_USER_ID, "baja", hash(STORE_PASSWORD), Role::Tienda, Some(1), false),
        user(LEGACY_USER_ID, "legado", "1234".into(), Role::Tienda, Some(2), true),
        user(UNBOUND_USER_ID, "suelto", hash(STORE_PASSWORD), Role::Tienda, None, true),
        user(SECOND_ADMIN_ID, "gerente", hash(ADMIN_PASSWORD), Role::Admin, None, true),
    ]
}

pub fn identity(id_usuario: i64, rol: Role, id_tienda: Option<i64>) -> CurrentUser {
    CurrentUser {
        id_usuario,
        rol,
        id_tienda,
    }
}

pub fn admin() -> CurrentUser {
    identity(ADMIN_ID, Role::Admin, None)
}

/// TIENDA user bound to store 3
pub fn tienda_sur() -> CurrentUser {
    identity(SUR_USER_ID, Role::Tienda, Some(3))
}

/// A stored report row with the given amounts
pub fn report(
    id_reporte: i64,
    fecha: NaiveDate,
    turno: i16,
    id_tienda: i64,
    amounts: CaptureAmounts,
) -> DailyReport {
    DailyReport {
        id_reporte,
        fecha,
        turno,
        id_tienda,
        id_usuario: SUR_USER_ID,
        efectivo: amounts.efectivo,
        transferencia: amounts.transferencia,
        terminal1: amounts.terminal1,
        terminal2: amounts.terminal2,
        gastos: amounts.gastos,
        retiro: amounts.retiro,
        fondo_inicial: amounts.fondo_inicial,
        total: amounts.total(),
        fecha_registro: Utc::now(),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub reports: Arc<MemoryReportRepository>,
}

/// State with the default fixtures, clock frozen at `now`
pub fn context_at(now: DateTime<Utc>) -> TestContext {
    context_with_reports(now, Vec::new())
}

pub fn context_with_reports(now: DateTime<Utc>, rows: Vec<DailyReport>) -> TestContext {
    let reports = Arc::new(MemoryReportRepository::with_reports(rows));
    let repos = Repositories {
        users: Arc::new(MemoryUserRepository::with_users(users())),
        stores: Arc::new(MemoryStoreRepository::with_stores(stores())),
        reports: reports.clone(),
    };
    let state = AppState::with_parts(Config::for_tests(), repos, Arc::new(FixedClock(now)));
    TestContext { state, reports }
}

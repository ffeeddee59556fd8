//! Store Model (tiendas)

use serde::{Deserialize, Serialize};

/// Store reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id_tienda: i64,
    pub nombre: String,
    #[serde(default = "default_active")]
    pub activo: bool,
}

fn default_active() -> bool {
    true
}

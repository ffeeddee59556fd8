//! Store directory handlers

use axum::extract::State;
use serde::Serialize;
use shared::error::{ApiResponse, AppResult};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StoreEntry {
    pub id_tienda: i64,
    pub nombre: String,
}

#[derive(Debug, Serialize)]
pub struct StoreList {
    pub tiendas: Vec<StoreEntry>,
}

/// GET /api/tiendas - active stores ordered by id
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<StoreList>> {
    let tiendas = state
        .stores
        .list_active()
        .await?
        .into_iter()
        .map(|s| StoreEntry {
            id_tienda: s.id_tienda,
            nombre: s.nombre,
        })
        .collect();
    Ok(ApiResponse::success(StoreList { tiendas }))
}

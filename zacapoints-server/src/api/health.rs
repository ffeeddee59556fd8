//! Health check and version endpoints

use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "ok": true,
        "status": "ok",
        "service": "zacapoints-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn version() -> Json<Value> {
    Json(json!({
        "ok": true,
        "app": "zacapoints-api",
        "version": env!("CARGO_PKG_VERSION"),
        "fecha": Utc::now().to_rfc3339(),
    }))
}

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{error::Result, store::DocumentStore};

pub async fn health_check(
    State(store): State<Arc<dyn DocumentStore>>,
) -> Result<Json<serde_json::Value>> {
    store.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

//! UI entry point and liveness check.

use axum::{
    routing::{get_service, MethodRouter},
    Json,
};
use serde_json::{json, Value};
use std::path::Path;
use tower_http::services::ServeFile;

/// Route serving the single HTML entry point; 404 when the file is absent.
pub fn index_route<S>(index: &Path) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get_service(ServeFile::new(index))
}

/// `GET /ping`
pub async fn ping() -> Json<Value> {
    Json(json!({ "ok": true }))
}

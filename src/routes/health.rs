use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::operations::now_iso;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    uptime: u64,
    timestamp: String,
}

pub async fn health(State(state): State<AppState>) -> Response {
    let database_ok = match state.db_proxy() {
        Some(proxy) => proxy.ping().await.is_ok(),
        None => false,
    };

    let body = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" },
        database: if database_ok {
            "connected"
        } else {
            "disconnected"
        },
        uptime: state.uptime_seconds(),
        timestamp: now_iso(),
    };

    let status_code = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(body)).into_response()
}

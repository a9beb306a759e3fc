mod admin;
mod auth;
mod collections;
mod health;
mod today;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // Favorite reads and writes need the caller's ambient identity; the
    // other endpoints are open (login is how identity gets established).
    let collection_routes = Router::new()
        .route(
            "/api/collections",
            get(collections::list).post(collections::manage),
        )
        .layer(middleware::from_fn(crate::auth::require_identity));

    Router::new()
        .route("/api/sentence/today", get(today::today_sentence))
        .route("/api/auth/login", post(auth::login))
        .route("/api/admin/sentences", post(admin::manage_sentences))
        .merge(collection_routes)
        .route("/health", get(health::health))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "接口不存在").into_response()
}

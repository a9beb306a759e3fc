#![allow(dead_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{CredentialExchanger, HmacCredentialExchanger};
use crate::state::AppState;

pub async fn create_app() -> axum::Router {
    let config = config::Config::from_env();

    let db_proxy = match db::DatabaseProxy::connect(&config.database_url).await {
        Ok(proxy) => Some(proxy),
        Err(err) => {
            tracing::warn!(error = %err, "database not initialized");
            None
        }
    };

    let exchanger: Arc<dyn CredentialExchanger> =
        Arc::new(HmacCredentialExchanger::new(config.app_secret.clone()));

    create_app_with(db_proxy, exchanger)
}

pub fn create_app_with(
    db_proxy: Option<Arc<db::DatabaseProxy>>,
    exchanger: Arc<dyn CredentialExchanger>,
) -> axum::Router {
    let state = AppState::new(db_proxy, exchanger);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

use std::sync::Arc;

use daily_sentence::auth::{CredentialExchanger, HmacCredentialExchanger};
use daily_sentence::config::Config;
use daily_sentence::db::DatabaseProxy;
use daily_sentence::logging;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let _log_guard = logging::init_tracing(&config.log_level);

    let db_proxy = match DatabaseProxy::connect(&config.database_url).await {
        Ok(proxy) => Some(proxy),
        Err(err) => {
            tracing::warn!(error = %err, "database not initialized");
            None
        }
    };

    let exchanger: Arc<dyn CredentialExchanger> =
        Arc::new(HmacCredentialExchanger::new(config.app_secret.clone()));

    let app = daily_sentence::create_app_with(db_proxy, exchanger);

    let addr = config.bind_addr();
    tracing::info!(%addr, "daily-sentence listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

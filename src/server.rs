use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

use crate::api;
use crate::config::{ensure_db_dir, ServerConfig};
use crate::db::Store;

/// Open the store, bind the listener and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<()> {
    ensure_db_dir(&config.db_path)?;
    let store = Store::open(&config.db_path)?;
    log::info!("using database {}", config.db_path);

    let app = api::router(store, config.origin.clone());

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    log::info!(
        "listening on {}, allowing origin {:?}",
        listener.local_addr()?,
        config.origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::warn!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    log::info!("shutdown signal received");
}

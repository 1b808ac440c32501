//! Event Bulletin Server binary
//!
//! Opens the SQLite file, makes sure the `events` table exists, serves the
//! HTTP API and closes the database when interrupted.

use anyhow::{Context, Result};
use bulletin_server::{config::ServerConfig, router, storage::Database, AppState};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    // Panics inside request handlers only reach the log through this hook
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        match info.location() {
            Some(l) => error!(file = l.file(), line = l.line(), "panic: {}", payload),
            None => error!("panic: {}", payload),
        }
    }));

    info!(
        "Starting Bulletin Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address,
        config.database_path.display()
    );

    let db = Database::open(&config.database_path)
        .await
        .with_context(|| {
            format!(
                "Error connecting to SQLite database at {} (check write permissions)",
                config.database_path.display()
            )
        })?;

    info!("SQLite database ready at {}", db.path().display());

    // A missing table is not fatal; requests will report storage errors.
    match db.ensure_schema().await {
        Ok(()) => info!("Events table ready."),
        Err(e) => error!("Error creating events table: {}", e),
    }

    let state = AppState::new(db);
    let app = router(state.clone());

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.db.close().await;
    info!("Database connection closed.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received, closing database connection...");
}

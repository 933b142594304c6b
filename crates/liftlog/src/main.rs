mod bootstrap;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use lift_core::settings::Settings;
use lift_data::store::DataStore;
use lift_server::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    bootstrap::ensure_storage_dir(&settings.storage_dir)?;

    tracing::info!("Liftlog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Storage: {}, Assets: {}",
        settings.storage_dir.display(),
        settings.assets_dir.display()
    );

    // Initial blocking sweep over every stored export. Later reloads are
    // triggered by the upload endpoint.
    let store = Arc::new(DataStore::new(settings.storage_dir.clone()));
    let loaded = store.load();
    tracing::info!("Loaded {} user series", loaded);

    let app = lift_server::build_router(AppContext { store }, &settings.assets_dir);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when Ctrl+C is received, letting in-flight requests finish.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Ctrl+C received; shutting down");
}

use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive;
/// an unrecognised level falls back to `"info"`.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the storage directory exists, creating any missing parents.
///
/// Uploads are written here and the initial load sweeps it, so it must
/// exist before either path runs.
pub fn ensure_storage_dir(storage_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(storage_dir)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

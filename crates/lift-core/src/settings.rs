use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Self-hosted progress dashboard for Strong workout-log exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "liftlog",
    about = "Self-hosted progress dashboard for Strong workout-log exports",
    version
)]
pub struct Settings {
    /// Directory holding the uploaded workout exports
    #[arg(long, default_value = "storage", env = "LIFTLOG_STORAGE_DIR")]
    pub storage_dir: PathBuf,

    /// Directory holding the static web client
    #[arg(long, default_value = "client", env = "LIFTLOG_ASSETS_DIR")]
    pub assets_dir: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server binds to
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

impl Settings {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

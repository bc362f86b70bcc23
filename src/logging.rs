use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constant::LOG_ENV;

fn log_dir() -> PathBuf {
    ProjectDirs::from("", "", "fileselector")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("fileselector-logs"))
}

/// Logs go to a daily file; the terminal belongs to the picker. Keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("cannot create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, "fileselector.log"));
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .wrap_err("failed to install the log subscriber")?;

    Ok(guard)
}

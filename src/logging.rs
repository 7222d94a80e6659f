//! Log output. The alternate screen owns the terminal, so records go to a
//! daily file under the platform data directory instead of stderr.

use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "forms_tui=info";

const FILE_PREFIX: &str = "forms-tui";

/// Directory holding the log files, when the platform has a data dir
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "forms", "forms-tui").map(|dirs| dirs.data_dir().join("logs"))
}

/// Daily rotating appender in `dir`, keeping a week of files
pub fn file_appender(dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}

/// Install the global subscriber. Without a log directory nothing is written.
pub fn setup_logging(dir: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match dir {
        Some(dir) => Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_appender(dir)?),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}

//! File logging; the terminal belongs to the UI

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "rickmorty=info";
const LOG_FILE_NAME: &str = "rickmorty.log";

/// `<data_local_dir>/rickmorty/rickmorty.log`, or `./rickmorty.log` when the
/// platform has no data dir.
pub fn default_log_path() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|dir| dir.join("rickmorty"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber writing to `path`.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(path: &Path) -> io::Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sends tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is written to stdout or stderr. Filter comes from `TRIVIA_LOG`.
pub fn init_logging(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create log dir {}: {}", parent.display(), e))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Cannot open log file {}: {}", path.display(), e))?;

    let filter = EnvFilter::try_from_env("TRIVIA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("trivia_board=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| format!("Cannot initialize logging: {}", e))
}

use color_eyre::eyre::WrapErr;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Where log records ended up.
#[derive(Debug, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    /// The log file could not be opened; records are dropped.
    Discarded(String),
}

/// Routes `tracing` output to `path`. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr. An unusable log path is not fatal.
pub fn init_logging(path: &Path, debug: bool) -> color_eyre::eyre::Result<LogDestination> {
    let (writer, destination) = log_writer(path);
    let level = if debug { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to install log subscriber: {e}"))?;

    Ok(destination)
}

fn log_writer(path: &Path) -> (BoxMakeWriter, LogDestination) {
    match open_log_file(path) {
        Ok(file) => (
            BoxMakeWriter::new(Mutex::new(file)),
            LogDestination::File(path.to_path_buf()),
        ),
        Err(e) => (
            BoxMakeWriter::new(std::io::sink),
            LogDestination::Discarded(format!("{e:#}")),
        ),
    }
}

fn open_log_file(path: &Path) -> color_eyre::eyre::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))
}

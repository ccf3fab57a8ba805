// Tracing setup and append-only log files

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::Level;

/// Install the stderr tracing subscriber. `verbosity` is the number of `-v`
/// flags: 0 = warnings, 1 = info, 2+ = debug.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    // A second init (e.g. from tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append a timestamped line to `path`, creating the file if needed
pub fn append_log_line(path: &Path, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "[{}] {}", timestamp, message)
        .with_context(|| format!("Failed to write log file: {}", path.display()))?;
    Ok(())
}

/// Write debug log to deckprofile.log in current directory
#[cfg(feature = "dev-logging")]
pub fn write_debug_log(message: &str) -> Result<()> {
    let log_path = std::env::current_dir()?.join("deckprofile.log");
    append_log_line(&log_path, message)
}

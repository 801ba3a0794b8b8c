//! File logger behind the `log` facade.
//!
//! The terminal is owned by the UI, so records are appended to a file
//! instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{AppError, Result};

/// Environment variable overriding the configured log level.
pub const LOG_LEVEL_ENV: &str = "FEXPLORE_LOG";

pub struct FileLogger {
    level: Level,
    file: Mutex<File>,
}

impl FileLogger {
    fn format(record: &Record<'_>) -> String {
        format!(
            "{} {} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name; unknown names and "off" fall back to `Warn`.
pub fn parse_level(name: &str) -> Level {
    name.parse::<LevelFilter>()
        .ok()
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Level from `FEXPLORE_LOG`, falling back to the configured name.
fn resolve_level(configured: &str) -> Level {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => parse_level(&value),
        Err(_) => parse_level(configured),
    }
}

/// Install the file logger. Later calls are no-ops.
pub fn init(path: &Path, configured_level: &str) -> Result<()> {
    static LOGGER: OnceLock<FileLogger> = OnceLock::new();

    if LOGGER.get().is_some() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = resolve_level(configured_level);

    let logger = LOGGER.get_or_init(|| FileLogger {
        level,
        file: Mutex::new(file),
    });
    log::set_logger(logger)
        .map_err(|e| AppError::Io(io::Error::other(e.to_string())))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

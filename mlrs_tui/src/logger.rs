//! Capture logger feeding the console pane
//!
//! Writing to stderr would tear the alternate screen, so log records are
//! buffered here and drained by the app each tick.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Mutex;

static LOGGER: CaptureLogger = CaptureLogger;
static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", level_tag(record.level()), record.args());
        match LINES.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Take every line logged since the last call
pub fn drain() -> Vec<String> {
    match LINES.lock() {
        Ok(mut lines) => std::mem::take(&mut *lines),
        Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
    }
}

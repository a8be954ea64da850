//! Console Logger
//!
//! `log` backend for the browser: every record goes to the matching
//! `console` method and is kept in a bounded ring buffer so recent
//! diagnostics can be inspected after the fact.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept in the ring buffer
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Circular buffer of formatted lines
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Push a line, dropping the oldest one when full
    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

pub struct ConsoleLogger {
    level: LevelFilter,
    recent: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            recent: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Buffered lines, oldest first. Empty while the buffer is locked, so a
    /// panic raised mid-record cannot deadlock.
    pub fn recent(&self) -> Vec<String> {
        self.recent.try_lock().map(|r| r.lines()).unwrap_or_default()
    }

    fn remember(&self, line: String) {
        if let Ok(mut recent) = self.recent.lock() {
            recent.push(line);
        }
    }
}

/// Last path segment of a module target: `showcase_fx::effects::legacy` -> `legacy`
pub fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Console line for a record: `[target] message`
pub fn format_line(target: &str, args: &std::fmt::Arguments<'_>) -> String {
    format!("[{}] {}", short_target(target), args)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.target(), record.args());
        let value = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug => web_sys::console::log_1(&value),
            Level::Trace => web_sys::console::debug_1(&value),
        }
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
        self.remember(format!("{} {:<5} {}", stamp, record.level(), line));
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent log lines, oldest first. Empty before `init`.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut ring = RingBuffer::new(3);
        for i in 0..5 {
            ring.push(format!("line {}", i));
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let mut ring = RingBuffer::new(0);
        ring.push("a".to_string());
        ring.push("b".to_string());
        assert_eq!(ring.lines(), vec!["b"]);
    }

    #[test]
    fn test_logger_keeps_recent_lines() {
        let logger = ConsoleLogger::new(LevelFilter::Info, 2);
        assert!(logger.recent().is_empty());
        for line in ["one", "two", "three"] {
            logger.remember(line.to_string());
        }
        assert_eq!(logger.recent(), vec!["two", "three"]);
    }

    #[test]
    fn test_recent_is_empty_while_locked() {
        let logger = ConsoleLogger::new(LevelFilter::Info, 4);
        logger.remember("kept".to_string());
        let _held = logger.recent.lock().unwrap();
        assert!(logger.recent().is_empty());
    }

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("showcase_fx::effects::legacy"), "legacy");
        assert_eq!(short_target("main"), "main");
    }

    #[test]
    fn test_format_line() {
        let line = format_line("showcase_fx::app", &format_args!("mounted {} widgets", 3));
        assert_eq!(line, "[app] mounted 3 widgets");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn, 10);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}

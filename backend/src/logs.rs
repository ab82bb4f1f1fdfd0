//! Progress log for the import/export flow.
//!
//! Entries go to stderr (stdout is reserved for command output) and the most
//! recent ones are kept in memory so a caller can show them as notices.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Number of entries kept for [`LogBook::recent`].
const RETAINED_ENTRIES: usize = 100;

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting level for sub-steps
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Line as printed to the terminal.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Global log book
pub static LOG_BOOK: Lazy<LogBook> = Lazy::new(LogBook::new);

/// Prints entries and keeps the latest ones.
pub struct LogBook {
    entries: Mutex<VecDeque<LogEntry>>,
    quiet: AtomicBool,
}

impl LogBook {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(RETAINED_ENTRIES)),
            quiet: AtomicBool::new(false),
        }
    }

    pub fn log(&self, entry: LogEntry) {
        if !self.quiet.load(Ordering::Relaxed) {
            eprintln!("{}", entry.render());
        }

        // A poisoned lock only means a panic elsewhere mid-push; keep logging.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() == RETAINED_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Stop (or resume) printing; entries are still retained.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Retained entries, oldest first.
    pub fn recent(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }
}

impl Default for LogBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOG_BOOK.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BOOK.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BOOK.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BOOK.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BOOK.log(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(LogEntry::info("x").render(), "    x");
        assert_eq!(LogEntry::success("done").render(), "   ✓ done");
        assert_eq!(LogEntry::info("y").with_indent(1).render(), "       y");
    }

    #[test]
    fn test_book_retains_bounded_history() {
        let book = LogBook::new();
        book.set_quiet(true);
        for i in 0..(RETAINED_ENTRIES + 5) {
            book.log(LogEntry::info(format!("entry {}", i)));
        }

        let recent = book.recent();
        assert_eq!(recent.len(), RETAINED_ENTRIES);
        assert_eq!(recent[0].message, "entry 5");
        assert_eq!(recent.last().unwrap().message, format!("entry {}", RETAINED_ENTRIES + 4));
    }

    #[test]
    fn test_entry_serializes_lowercase_level() {
        let json = serde_json::to_value(LogEntry::warning("careful")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["indent"], 0);
    }
}

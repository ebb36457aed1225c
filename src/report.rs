//! Reporting sink — the only channel through which the core emits output.
//!
//! The library never prints. Every user-visible line (listings, errors,
//! warnings) goes through an injected [`Reporter`], and the front end decides
//! how to render each severity (colors on a terminal, plain text in a pipe,
//! a capture buffer in tests).

use std::cell::RefCell;

/// Severity tag attached to every reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Internal diagnostics, normally hidden.
    Debug,
    /// Informational output (help text, greetings).
    Info,
    /// Something suspicious, command continues.
    Warn,
    /// A failed command or bad input.
    Error,
    /// Ordinary command output with no tag (directory listings, file contents).
    Plain,
    /// A request to the front end rather than text to render (screen clear).
    /// Front ends without a screen may ignore it.
    Control,
}

/// Destination for reported lines.
pub trait Reporter {
    fn report(&self, severity: Severity, message: &str);
}

/// A [`Reporter`] that captures everything in memory.
///
/// Used by the test suites and by embedders that want to post-process
/// command output instead of printing it.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries in report order.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    /// Captured messages, any severity, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Captured messages matching one severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(tag, _)| *tag == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.entries
            .borrow_mut()
            .push((severity, message.to_owned()));
    }
}

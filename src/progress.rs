//! Progress reporting for the pipeline.
//!
//! The orchestrators report through an injected [`Progress`] rather than
//! writing to the console directly, so a run can be observed by a terminal, a
//! test, or any embedding application.

use std::sync::Mutex;

pub const LOG_MAX_LINES: usize = 300;
pub const LOG_LINE_MAX: usize = 600;

pub trait Progress: Send + Sync {
    fn log(&self, tag: &str, message: &str);

    fn info(&self, message: &str) {
        self.log("INFO", message);
    }

    fn ok(&self, message: &str) {
        self.log("OK", message);
    }

    fn warn(&self, message: &str) {
        self.log("WARN", message);
    }
}

/// Tagged lines on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&self, tag: &str, message: &str) {
        eprintln!("[{}] {}", tag, message);
    }
}

/// Bounded in-memory line buffer.
#[derive(Debug, Default)]
pub struct MemoryProgress {
    lines: Mutex<Vec<String>>,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::with_capacity(LOG_MAX_LINES)),
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.snapshot().iter().any(|l| l.contains(needle))
    }
}

impl Progress for MemoryProgress {
    fn log(&self, tag: &str, message: &str) {
        let mut guard = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if guard.len() >= LOG_MAX_LINES {
            let excess = guard.len() + 1 - LOG_MAX_LINES;
            guard.drain(0..excess);
        }
        let mut text = format!("[{}] {}", tag, message);
        if text.len() > LOG_LINE_MAX {
            let mut cut = LOG_LINE_MAX;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        guard.push(text);
    }
}

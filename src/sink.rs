//! Destinations for finished dumps.
//!
//! # Design Decisions
//! - The sink is injected into the interceptor, never looked up globally
//! - `is_debug_active` gates all dump work and must not allocate

use std::error::Error;
use std::sync::Mutex;

use tracing::Level;

use crate::dump::LogLine;

/// Target every [`TracingSink`] event is emitted on.
pub const TARGET: &str = "traffic_dump";

pub trait LogSink: Send + Sync + 'static {
    fn is_debug_active(&self) -> bool;

    fn debug(&self, line: &LogLine);

    /// Reports a contained failure together with its cause chain.
    fn error(&self, message: &str, cause: &(dyn Error + 'static));
}

/// Sink backed by the `tracing` subscriber installed in the process.
///
/// Filter it with e.g. `RUST_LOG=traffic_dump=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn is_debug_active(&self) -> bool {
        tracing::enabled!(target: TARGET, Level::DEBUG)
    }

    fn debug(&self, line: &LogLine) {
        tracing::debug!(target: TARGET, "{}", line);
    }

    fn error(&self, message: &str, cause: &(dyn Error + 'static)) {
        let chain = cause_chain(cause);
        tracing::error!(target: TARGET, error = %cause, chain = ?chain, "{}", message);
    }
}

/// Sink that keeps everything in memory, for tests and for hosts that forward
/// dumps elsewhere themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    debug_active: bool,
    lines: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new(debug_active: bool) -> Self {
        Self {
            debug_active,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Error reports, each rendered as `message: cause: source: ...`.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn is_debug_active(&self) -> bool {
        self.debug_active
    }

    fn debug(&self, line: &LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.as_str().to_string());
        }
    }

    fn error(&self, message: &str, cause: &(dyn Error + 'static)) {
        let mut report = message.to_string();
        for link in cause_chain(cause) {
            report.push_str(": ");
            report.push_str(&link);
        }
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(report);
        }
    }
}

/// `cause` followed by each of its sources.
pub fn cause_chain(cause: &(dyn Error + 'static)) -> Vec<String> {
    let mut chain = vec![cause.to_string()];
    let mut source = cause.source();
    while let Some(err) = source {
        chain.push(err.to_string());
        source = err.source();
    }
    chain
}

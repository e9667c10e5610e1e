//! Where soft-error diagnostics go.
//!
//! Each context writes `error: <message>` lines to its handler: stderr by
//! default, a buffer for tests and embedders that surface errors themselves,
//! or nowhere.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes diagnostics to stderr.
#[derive(Default)]
pub struct StderrDiagnostics;

impl StderrDiagnostics {
    pub fn println(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Captures diagnostics in memory.
pub struct BufferDiagnostics {
    buffer: Mutex<String>,
}

impl BufferDiagnostics {
    pub fn new() -> Self {
        BufferDiagnostics {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostics handler, dispatched by variant.
pub enum DiagnosticsImpl {
    Stderr(StderrDiagnostics),
    Buffer(BufferDiagnostics),
    Silent,
}

impl DiagnosticsImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stderr(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stderr(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Handler shared between a context and whoever reads its output.
pub type SharedDiagnostics = Arc<DiagnosticsImpl>;

pub fn stderr_handler() -> SharedDiagnostics {
    Arc::new(DiagnosticsImpl::Stderr(StderrDiagnostics))
}

pub fn buffer_handler() -> SharedDiagnostics {
    Arc::new(DiagnosticsImpl::Buffer(BufferDiagnostics::new()))
}

pub fn silent_handler() -> SharedDiagnostics {
    Arc::new(DiagnosticsImpl::Silent)
}

//! Pipeline-facing log.
//!
//! Anything the step wants the pipeline user to see goes through an
//! [`ActionLog`]. Internal diagnostics use `tracing` instead and end up on
//! stderr (see [`crate::logging`]).

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::action::commands::format_command;
use crate::action::mask::SecretMasker;

/// Sink for pipeline log lines.
///
/// Implementations must mask every registered secret before a line leaves
/// the sink.
pub trait ActionLog: Send + Sync {
    /// Register a value that must never appear in cleartext from now on.
    fn register_secret(&self, secret: &str);

    /// Redact registered secrets from `text`.
    fn mask(&self, text: &str) -> String;

    fn info(&self, message: &str);

    fn error(&self, message: &str);

    /// Report the step as failed with a user-visible reason.
    fn set_failed(&self, message: &str) {
        self.error(message);
    }
}

/// Writes lines and workflow commands to a writer (stdout in production).
pub struct WorkflowLog<W: Write + Send> {
    inner: Mutex<Inner<W>>,
}

struct Inner<W> {
    out: W,
    masker: SecretMasker,
}

impl WorkflowLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> WorkflowLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                masker: SecretMasker::new(),
            }),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn write_line(&self, line: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let masked = inner.masker.mask(line);
        if let Err(e) = writeln!(inner.out, "{masked}").and_then(|_| inner.out.flush()) {
            warn!(error = %e, "failed to write pipeline log line");
        }
    }
}

impl<W: Write + Send> ActionLog for WorkflowLog<W> {
    fn register_secret(&self, secret: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !inner.masker.add_secret(secret) {
            return;
        }
        // The runner consumes `add-mask` and redacts the value on its side too.
        let line = format_command("add-mask", &[], secret);
        if let Err(e) = writeln!(inner.out, "{line}").and_then(|_| inner.out.flush()) {
            warn!(error = %e, "failed to register secret with the runner");
        }
    }

    fn mask(&self, text: &str) -> String {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .masker
            .mask(text)
    }

    fn info(&self, message: &str) {
        self.write_line(message);
    }

    fn error(&self, message: &str) {
        let masked = self.mask(message);
        self.write_line(&format_command("error", &[], &masked));
    }
}

//! Success flag plus message returned by every entry point

use crate::io::error::SpliceError;
use std::fmt;

/// Result pair handed back to callers; entry points never return errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the operation produced everything it was asked to
    pub ok: bool,
    /// Human-readable summary including per-item problems
    pub message: String,
}

impl Outcome {
    /// Successful outcome
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    /// Failed outcome
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

impl From<SpliceError> for Outcome {
    fn from(error: SpliceError) -> Self {
        Self::failure(error.to_string())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.ok { "ok" } else { "failed" };
        write!(f, "[{status}] {}", self.message)
    }
}

/// Per-item bookkeeping for operations that write several outputs
#[derive(Debug, Default)]
pub struct BatchReport {
    written: Vec<String>,
    skipped: Vec<String>,
    failed: Vec<String>,
}

impl BatchReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written output by file name
    pub fn written(&mut self, name: impl Into<String>) {
        self.written.push(name.into());
    }

    /// Record an input that was skipped without failing the batch
    pub fn skipped(&mut self, item: impl fmt::Display, reason: impl fmt::Display) {
        log::warn!("skipping {item}: {reason}");
        self.skipped.push(format!("{item} ({reason})"));
    }

    /// Record an output unit that could not be produced
    pub fn failed(&mut self, item: impl fmt::Display, reason: impl fmt::Display) {
        log::error!("{item}: {reason}");
        self.failed.push(format!("{item}: {reason}"));
    }

    /// Names of written outputs in write order
    pub fn written_names(&self) -> &[String] {
        &self.written
    }

    /// Number of outputs written
    pub const fn written_count(&self) -> usize {
        self.written.len()
    }

    /// Turn the report into an outcome, prefixing `summary` on success
    ///
    /// The outcome is successful when at least one output was written and no
    /// unit failed. Skipped inputs are listed but do not fail the batch.
    pub fn into_outcome(self, summary: &str) -> Outcome {
        let ok = !self.written.is_empty() && self.failed.is_empty();
        let headline = if ok {
            summary.to_string()
        } else if self.written.is_empty() {
            "No output was written.".to_string()
        } else {
            format!(
                "Wrote {} output(s), {} failed.",
                self.written.len(),
                self.failed.len()
            )
        };
        let mut parts = vec![headline];
        if !self.failed.is_empty() {
            parts.push(format!("Failed: {}.", self.failed.join("; ")));
        }
        if !self.skipped.is_empty() {
            parts.push(format!(
                "Skipped {} input(s): {}.",
                self.skipped.len(),
                self.skipped.join("; ")
            ));
        }
        Outcome {
            ok,
            message: parts.join(" "),
        }
    }
}

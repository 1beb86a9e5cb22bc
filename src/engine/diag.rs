//! Skip diagnostics: per-path failure reporting and counters.
//!
//! Recoverable failures (unreadable directories, unstatable entries, files
//! that cannot be opened or read) never abort a run. Each one is written to
//! stderr with enough context to be actionable, counted, and — up to a cap —
//! sampled into the run report so callers wanting strict completeness can
//! inspect what was left out.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

/// How many skip records are retained verbatim in the report.
const SAMPLE_CAP: usize = 32;

/// Which phase a path was skipped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPhase {
    /// Directory enumeration or entry classification failed.
    Traversal,
    /// Content read failed during the hashing phase.
    Hashing,
}

/// One skipped path with its underlying error.
#[derive(Debug, Clone, Serialize)]
pub struct SkipRecord {
    /// The affected path.
    pub path: PathBuf,
    /// Phase the skip occurred in.
    pub phase: SkipPhase,
    /// Underlying system error, stringified.
    pub detail: String,
}

/// Thread-safe collector shared by traversal and all hashing workers.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    traversal_skips: AtomicU64,
    read_failures: AtomicU64,
    samples: Mutex<Vec<SkipRecord>>,
}

impl DiagnosticSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a skipped traversal entry or directory.
    pub fn report_traversal(&self, path: &Path, err: &std::io::Error) {
        self.traversal_skips.fetch_add(1, Ordering::Relaxed);
        self.record(path, SkipPhase::Traversal, err);
    }

    /// Report a file whose content could not be read.
    pub fn report_read(&self, path: &Path, err: &std::io::Error) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
        self.record(path, SkipPhase::Hashing, err);
    }

    /// Entries skipped during traversal so far.
    #[must_use]
    pub fn traversal_skips(&self) -> u64 {
        self.traversal_skips.load(Ordering::Relaxed)
    }

    /// Files that failed to read during hashing so far.
    #[must_use]
    pub fn read_failures(&self) -> u64 {
        self.read_failures.load(Ordering::Relaxed)
    }

    /// Drain the retained skip records.
    #[must_use]
    pub fn take_samples(&self) -> Vec<SkipRecord> {
        std::mem::take(&mut *self.samples.lock())
    }

    fn record(&self, path: &Path, phase: SkipPhase, err: &std::io::Error) {
        eprintln!("[DIRSIG] skipping {}: {err}", path.display());
        let mut samples = self.samples.lock();
        if samples.len() < SAMPLE_CAP {
            samples.push(SkipRecord {
                path: path.to_path_buf(),
                phase,
                detail: err.to_string(),
            });
        }
    }
}

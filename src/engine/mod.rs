//! The fingerprinting engine: traversal, sort, concurrent hashing, and the
//! final fold.
//!
//! A run moves through five states: INIT (allocate registry, gate, seeded
//! accumulator) → TRAVERSING (single-threaded walk) → SORTING (one-shot total
//! order) → HASHING (worker pool over the sorted registry) → FINALIZED (the
//! accumulator is the fingerprint; no further mutation). [`FingerprintEngine::run`]
//! drives the whole sequence and consumes the engine, so a finalized run can
//! never be mutated again.

pub mod accumulator;
pub mod content;
pub mod diag;
pub mod gate;
pub mod hash;
pub mod io;
pub mod registry;
pub mod traverse;

use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel as channel;
use serde::Serialize;

use crate::core::config::Config;
use crate::core::errors::{DirsigError, Result};

use accumulator::Accumulator;
use content::ContentHasher;
use diag::{DiagnosticSink, SkipRecord};
use gate::DuplicateGate;
use registry::PathRegistry;

/// Progress notifications emitted during a run.
///
/// Events are observational: they are delivered on a best-effort basis over a
/// bounded channel and dropped when the consumer lags. The fingerprint never
/// depends on them, and a slow or absent consumer never stalls hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Traversal and sorting finished; hashing is about to start.
    TraversalComplete {
        /// Number of registered files about to be hashed.
        files: u64,
        /// Wall-clock time spent traversing and sorting.
        duration: Duration,
    },
    /// One more file finished processing (hashed, deduplicated, or skipped).
    FileProcessed {
        /// Files processed so far.
        completed: u64,
        /// Total files registered.
        total: u64,
    },
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// The directory fingerprint.
    pub fingerprint: u64,
    /// Regular files registered by traversal.
    pub files_total: u64,
    /// Files whose content hash was folded (first-seen).
    pub files_hashed: u64,
    /// Files whose content hash was suppressed as duplicate.
    pub duplicates: u64,
    /// Files skipped because their content could not be read.
    pub read_failures: u64,
    /// Traversal entries skipped because they could not be enumerated.
    pub traversal_skips: u64,
    /// Subdirectories visited.
    pub directories: u64,
    /// Symbolic links folded.
    pub symlinks: u64,
    /// Worker threads used for the hashing phase.
    pub workers: usize,
    /// Wall-clock time for traversal + sort.
    pub traversal_time: Duration,
    /// Total wall-clock time for the run.
    pub elapsed: Duration,
    /// Sampled skip records (bounded; counts above are exact).
    pub skipped: Vec<SkipRecord>,
}

impl RunReport {
    /// The fingerprint as fixed-width lowercase hex.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        format!("{:016x}", self.fingerprint)
    }
}

/// Computes directory-tree fingerprints.
pub struct FingerprintEngine {
    config: Config,
    events: Option<channel::Sender<EngineEvent>>,
}

impl FingerprintEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            events: None,
        }
    }

    /// Attach a progress event channel (see [`EngineEvent`] for delivery
    /// semantics).
    #[must_use]
    pub fn with_events(mut self, events: channel::Sender<EngineEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Fingerprint the tree rooted at `root`.
    ///
    /// Consumes the engine: once this returns, the run is finalized and the
    /// report is immutable. Recoverable per-path failures are reported,
    /// counted, and skipped; the fingerprint covers whatever subset of the
    /// tree was readable.
    pub fn run(self, root: &Path) -> Result<RunReport> {
        let started = Instant::now();
        let sink = DiagnosticSink::new();

        // TRAVERSING, then SORTING.
        let mut registry = PathRegistry::with_capacity(self.config.engine.registry_capacity);
        let summary = traverse::traverse(root, &mut registry, &sink)?;
        registry.sort();
        let traversal_time = started.elapsed();
        let total = registry.len() as u64;
        self.emit(EngineEvent::TraversalComplete {
            files: total,
            duration: traversal_time,
        });

        // HASHING.
        let workers = self.config.effective_workers().min(registry.len().max(1));
        let gate = DuplicateGate::new(self.config.engine.gate_bytes);
        let accumulator = Accumulator::new(summary.structural);
        let shared = HashShared {
            registry: &registry,
            gate: &gate,
            accumulator: &accumulator,
            next_index: AtomicUsize::new(0),
            completed: AtomicU64::new(0),
            hashed: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            total,
            sink: &sink,
            events: self.events.as_ref(),
        };

        if total > 0 {
            thread::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(|| worker_loop(&shared));
                }
            });

            // All workers died before claiming anything: the read backend is
            // unavailable, and a structure-only fingerprint must not pass as
            // a content fingerprint.
            if shared.completed.load(Ordering::Relaxed) == 0 {
                return Err(DirsigError::RingSetup {
                    details: "no hashing worker could start".to_string(),
                });
            }
        }

        let files_hashed = shared.hashed.load(Ordering::Relaxed);
        let duplicates = shared.duplicates.load(Ordering::Relaxed);
        drop(shared);

        // FINALIZED.
        Ok(RunReport {
            fingerprint: accumulator.finish(),
            files_total: total,
            files_hashed,
            duplicates,
            read_failures: sink.read_failures(),
            traversal_skips: sink.traversal_skips(),
            directories: summary.directories,
            symlinks: summary.symlinks,
            workers,
            traversal_time,
            elapsed: started.elapsed(),
            skipped: sink.take_samples(),
        })
    }

    fn emit(&self, event: EngineEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.try_send(event);
        }
    }
}

/// State shared by every hashing worker for one run.
struct HashShared<'a> {
    registry: &'a PathRegistry,
    gate: &'a DuplicateGate,
    accumulator: &'a Accumulator,
    next_index: AtomicUsize,
    completed: AtomicU64,
    hashed: AtomicU64,
    duplicates: AtomicU64,
    total: u64,
    sink: &'a DiagnosticSink,
    events: Option<&'a channel::Sender<EngineEvent>>,
}

/// One worker: claim the next unclaimed registry index, hash it, gate it,
/// fold it. Dynamic claiming load-balances across wildly varying file sizes;
/// every index is claimed by exactly one worker exactly once.
fn worker_loop(shared: &HashShared<'_>) {
    let mut hasher = match ContentHasher::new() {
        Ok(hasher) => hasher,
        Err(err) => {
            eprintln!("[DIRSIG] hashing worker failed to start: {err}");
            return;
        }
    };

    loop {
        let index = shared.next_index.fetch_add(1, Ordering::Relaxed);
        let Some(path) = shared.registry.get(index) else {
            break;
        };

        match hasher.hash_file(path) {
            Ok(content_hash) => {
                if shared.gate.contains(content_hash) {
                    shared.duplicates.fetch_add(1, Ordering::Relaxed);
                } else {
                    shared.gate.insert(content_hash);
                    shared.accumulator.fold(content_hash);
                    shared.hashed.fetch_add(1, Ordering::Relaxed);
                }
            }
            Err(err) => shared.sink.report_read(path, &err),
        }

        let completed = shared.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(tx) = shared.events {
            let _ = tx.try_send(EngineEvent::FileProcessed {
                completed,
                total: shared.total,
            });
        }
    }
}

//! Order-independent fingerprint accumulator.
//!
//! The fold operator is plain XOR: commutative and associative, so the final
//! value depends only on the multiset of folded hashes, never on which worker
//! folded which hash first. Multiply-then-mix folds do not commute across
//! workers and are not reproducible here.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared 64-bit accumulator updated by concurrent workers.
#[derive(Debug)]
pub struct Accumulator {
    value: AtomicU64,
}

impl Accumulator {
    /// Create an accumulator starting from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            value: AtomicU64::new(seed),
        }
    }

    /// Fold one hash into the accumulator.
    pub fn fold(&self, hash: u64) {
        self.value.fetch_xor(hash, Ordering::Relaxed);
    }

    /// Current accumulated value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Consume the accumulator, yielding the final value.
    #[must_use]
    pub fn finish(self) -> u64 {
        self.value.into_inner()
    }
}

//! Duplicate gate: a lock-free Bloom filter over previously seen content
//! hashes.
//!
//! Answers "possibly seen before" with no false negatives and a tunable
//! false-positive rate. All workers share one filter; insertion and lookup
//! are single atomic byte operations, so no global lock is needed.
//!
//! A `contains` immediately followed by an `insert` is deliberately not
//! atomic as a pair: two workers hashing byte-identical files at the same
//! instant can both observe "absent" and both fold. Under the XOR fold the
//! two contributions cancel, so that content drops out of the fingerprint
//! for the run in which the race fired. Closing the window would cost a lock
//! or a CAS loop on every file; the window is a few instructions wide and
//! only reachable when duplicate contents finish hashing simultaneously.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::engine::hash::STRUCTURAL_SEED;

/// Fixed-size concurrent Bloom filter keyed by 64-bit content hashes.
#[derive(Debug)]
pub struct DuplicateGate {
    bits: Box<[AtomicU8]>,
    bit_count: u64,
    seed2: u64,
}

impl DuplicateGate {
    /// Allocate a gate over `bytes` atomic bytes (`bytes * 8` addressable
    /// bits). Sizes below one byte are rounded up to one.
    #[must_use]
    pub fn new(bytes: usize) -> Self {
        let len = bytes.max(1);
        let mut bits = Vec::with_capacity(len);
        bits.resize_with(len, || AtomicU8::new(0));
        Self {
            bits: bits.into_boxed_slice(),
            bit_count: (len as u64) * 8,
            seed2: STRUCTURAL_SEED + 1,
        }
    }

    /// Mark `hash` as seen. Safe to call concurrently with other `insert` and
    /// `contains` calls; once set, a bit is never cleared.
    pub fn insert(&self, hash: u64) {
        for (byte, mask) in self.probes(hash) {
            self.bits[byte].fetch_or(mask, Ordering::Relaxed);
        }
    }

    /// Whether `hash` was possibly seen before. False positives are possible;
    /// false negatives are not (absent a concurrent insert of `hash` itself).
    #[must_use]
    pub fn contains(&self, hash: u64) -> bool {
        self.probes(hash)
            .into_iter()
            .all(|(byte, mask)| self.bits[byte].load(Ordering::Relaxed) & mask != 0)
    }

    /// Total addressable bits.
    #[must_use]
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// The two probe positions for `hash`, as (byte index, bit mask) pairs.
    ///
    /// Indices range over the full bit span of the allocation, so every
    /// allocated bit is addressable.
    fn probes(&self, hash: u64) -> [(usize, u8); 2] {
        let h1 = hash;
        let h2 = hash ^ self.seed2;
        [self.probe(h1), self.probe(h2)]
    }

    #[allow(clippy::cast_possible_truncation)]
    fn probe(&self, h: u64) -> (usize, u8) {
        let index = h % self.bit_count;
        ((index / 8) as usize, 1u8 << (index % 8))
    }
}

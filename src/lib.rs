#![deny(unsafe_code)]

//! dirsig — concurrent directory-tree fingerprinting.
//!
//! Computes one 64-bit fingerprint summarizing the complete contents of a
//! directory tree: every regular file's bytes, every symbolic link's target,
//! and the structural names that bind them together. Intended for change
//! detection (build caches, backup verification, replica comparison) where
//! recomputing a full fingerprint must be fast on multi-core machines with
//! large file counts.
//!
//! A run has four phases:
//! 1. **Traversal** — single-threaded walk registering every regular file and
//!    folding structural (name / symlink-target) hashes
//! 2. **Sort** — byte-lexicographic ordering of the registry for a stable
//!    enumeration
//! 3. **Hashing** — a worker pool content-hashes every file, one asynchronous
//!    read per file, deduplicating byte-identical content through a lock-free
//!    Bloom filter
//! 4. **Finalize** — the order-independent accumulator becomes the fingerprint
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use dirsig::prelude::*;
//!
//! let report = FingerprintEngine::new(Config::default()).run("/some/tree".as_ref())?;
//! println!("{:016x}", report.fingerprint);
//! # Ok::<(), DirsigError>(())
//! ```

pub mod prelude;

pub mod core;
pub mod engine;
pub mod progress;

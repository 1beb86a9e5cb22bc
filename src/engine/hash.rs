//! Seeded 64-bit hashing for structure and content.
//!
//! Both hash families are XXH64 with fixed seeds, so the same bytes always
//! produce the same value across runs, platforms, and read chunkings. The
//! seeds differ: a name and a file body with identical bytes must never
//! produce colliding contributions to the fingerprint.

use std::ffi::OsStr;

use xxhash_rust::xxh64::xxh64;

/// Seed for structural hashes (entry names, symlink targets) and the initial
/// value of the fingerprint accumulator.
pub const STRUCTURAL_SEED: u64 = 5381;

/// Seed for content hashes. Distinct from [`STRUCTURAL_SEED`] by construction.
pub const CONTENT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hash a file body. A pure function of the byte sequence and seed only.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> u64 {
    xxh64(bytes, CONTENT_SEED)
}

/// Hash of the empty byte sequence; the content hash of every empty file.
#[must_use]
pub fn empty_content_hash() -> u64 {
    content_hash(&[])
}

/// Hash an entry's base name.
#[must_use]
pub fn name_hash(name: &OsStr) -> u64 {
    xxh64(os_bytes(name), STRUCTURAL_SEED)
}

/// Hash a symbolic link's target string.
#[must_use]
pub fn link_target_hash(target: &OsStr) -> u64 {
    xxh64(os_bytes(target), STRUCTURAL_SEED)
}

fn os_bytes(s: &OsStr) -> &[u8] {
    s.as_encoded_bytes()
}

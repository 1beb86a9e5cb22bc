//! Append-only registry of discovered file paths.
//!
//! Populated by traversal, sorted once, then read-only for the hashing phase.
//! The sorted order is the enumeration contract the rest of the system relies
//! on; the final fingerprint is order-independent regardless.

use std::path::{Path, PathBuf};

use crate::core::paths::lexicographic_key;

/// Ordered container of absolute file paths.
///
/// Duplicate insertions are preserved as distinct entries — suppressing
/// byte-identical *content* is the duplicate gate's job, not the registry's.
#[derive(Debug)]
pub struct PathRegistry {
    paths: Vec<PathBuf>,
}

impl PathRegistry {
    /// Create an empty registry with an initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
        }
    }

    /// Append a path. Amortized O(1); the backing storage doubles on overflow.
    pub fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Sort entries into strict byte-lexicographic order by full path.
    pub fn sort(&mut self) {
        self.paths
            .sort_unstable_by(|a, b| lexicographic_key(a).cmp(lexicographic_key(b)));
    }

    /// Number of registered paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Entry at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// The registered paths, in current order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_of(paths: &[&str]) -> PathRegistry {
        let mut registry = PathRegistry::with_capacity(4);
        for p in paths {
            registry.push(PathBuf::from(p));
        }
        registry
    }

    #[test]
    fn preserves_duplicates() {
        let registry = registry_of(&["/a/x", "/a/x", "/a/y"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn sorts_byte_lexicographically() {
        let mut registry = registry_of(&["/a/b/c", "/a/b-c", "/a/a"]);
        registry.sort();
        let sorted: Vec<&Path> = registry.paths().iter().map(PathBuf::as_path).collect();
        // '-' (0x2d) < '/' (0x2f), so "/a/b-c" precedes "/a/b/c".
        assert_eq!(
            sorted,
            vec![Path::new("/a/a"), Path::new("/a/b-c"), Path::new("/a/b/c")]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let mut registry = registry_of(&["/z", "/a", "/m"]);
        registry.sort();
        let first: Vec<PathBuf> = registry.paths().to_vec();
        registry.sort();
        assert_eq!(registry.paths(), first.as_slice());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut registry = PathRegistry::with_capacity(1);
        for i in 0..100 {
            registry.push(PathBuf::from(format!("/f{i}")));
        }
        assert_eq!(registry.len(), 100);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let registry = registry_of(&["/only"]);
        assert!(registry.get(0).is_some());
        assert!(registry.get(1).is_none());
    }
}

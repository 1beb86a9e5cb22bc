//! Single-threaded depth-first traversal with structural folding.
//!
//! Walks the tree once, registering every regular file's absolute path and
//! XOR-folding structural hashes (entry names, symlink targets) into a
//! running accumulator. Directory entries arrive from the operating system in
//! an arbitrary order; nothing here depends on it — determinism comes from
//! sorting the registry afterwards, and the structural fold is
//! order-independent by construction.
//!
//! Recursion is an explicit directory stack, so pathological tree depth
//! cannot exhaust the call stack.

use std::fs;
use std::path::Path;

use crate::core::errors::{DirsigError, Result};
use crate::core::paths::resolve_root;
use crate::engine::diag::DiagnosticSink;
use crate::engine::hash::{STRUCTURAL_SEED, link_target_hash, name_hash};
use crate::engine::registry::PathRegistry;

/// What traversal observed, beyond the registry it filled.
#[derive(Debug, Clone, Copy)]
pub struct TraversalSummary {
    /// Structural accumulator: the fixed seed folded with every retained
    /// entry's name hash (and, for symlinks, name XOR target).
    pub structural: u64,
    /// Subdirectories descended into.
    pub directories: u64,
    /// Symbolic links folded (never followed).
    pub symlinks: u64,
}

/// Walk `root`, registering every regular file and folding structural hashes.
///
/// Symbolic links contribute `name_hash XOR target_hash` and are never
/// followed — a link pointing at its own parent terminates like any other.
/// Entries that cannot be classified and directories that cannot be read are
/// reported to `sink` and skipped; traversal continues with their siblings.
pub fn traverse(
    root: &Path,
    registry: &mut PathRegistry,
    sink: &DiagnosticSink,
) -> Result<TraversalSummary> {
    let root = resolve_root(root).map_err(|e| DirsigError::io(root, e))?;
    let meta = fs::metadata(&root).map_err(|e| DirsigError::io(&root, e))?;
    if !meta.is_dir() {
        return Err(DirsigError::NotADirectory { path: root });
    }

    let mut structural = STRUCTURAL_SEED;
    let mut directories = 0u64;
    let mut symlinks = 0u64;

    let mut stack = vec![root];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                sink.report_traversal(&dir, &err);
                continue;
            }
        };

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    sink.report_traversal(&dir, &err);
                    continue;
                }
            };

            let path = entry.path();
            // file_type() does not follow symlinks, so a link to a directory
            // lands in the symlink arm and is never descended into.
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(err) => {
                    sink.report_traversal(&path, &err);
                    continue;
                }
            };

            if file_type.is_symlink() {
                match fs::read_link(&path) {
                    Ok(target) => {
                        structural ^= name_hash(&entry.file_name())
                            ^ link_target_hash(target.as_os_str());
                        symlinks += 1;
                    }
                    Err(err) => sink.report_traversal(&path, &err),
                }
            } else if file_type.is_dir() {
                structural ^= name_hash(&entry.file_name());
                directories += 1;
                stack.push(path);
            } else if file_type.is_file() {
                structural ^= name_hash(&entry.file_name());
                registry.push(path);
            }
            // Sockets, FIFOs, devices: no content, no structural weight.
        }
    }

    Ok(TraversalSummary {
        structural,
        directories,
        symlinks,
    })
}

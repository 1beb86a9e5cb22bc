//! Whole-file read backends for the hashing phase.
//!
//! Linux routes every read through a per-worker `io_uring` instance: one
//! submission covering the whole file, one blocking wait on its completion.
//! Other platforms fall back to positional reads with identical semantics.
//! Either way the caller hands in a single buffer sized to the file's length
//! and gets back exactly its bytes — the hash downstream is a pure function
//! of those bytes, never of how the transfer was chunked.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

#[cfg(target_os = "linux")]
mod uring;

#[cfg(not(target_os = "linux"))]
mod portable;

#[cfg(target_os = "linux")]
pub use uring::FileReader;

#[cfg(not(target_os = "linux"))]
pub use portable::FileReader;

/// Open a file for hashing without perturbing its access time where the
/// platform allows it.
///
/// The kernel refuses `O_NOATIME` for files the process does not own; those
/// opens are retried without the flag rather than skipping the file.
pub fn open_for_hashing(path: &Path) -> io::Result<File> {
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::fs::OpenOptionsExt;
        match OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOATIME)
            .open(path)
        {
            Ok(file) => Ok(file),
            Err(err) if err.raw_os_error() == Some(libc::EPERM) => {
                OpenOptions::new().read(true).open(path)
            }
            Err(err) => Err(err),
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        OpenOptions::new().read(true).open(path)
    }
}

//! Per-file content hashing with a single asynchronous read.

use std::io;
use std::path::Path;

use crate::engine::hash;
use crate::engine::io::{FileReader, open_for_hashing};

/// Per-worker content hasher; owns the worker's read backend.
pub struct ContentHasher {
    reader: FileReader,
}

impl ContentHasher {
    /// Create a hasher with its own read backend.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            reader: FileReader::new()?,
        })
    }

    /// Compute the 64-bit content hash of one file.
    ///
    /// The file is opened without an access-time update where possible, sized
    /// once, and read in its entirety into a single buffer before hashing.
    /// Handle, buffer, and any in-flight request are torn down before this
    /// returns. Errors are reported to the caller, which skips the file —
    /// an unreadable file degrades the fingerprint's completeness, never the
    /// run.
    pub fn hash_file(&mut self, path: &Path) -> io::Result<u64> {
        let file = open_for_hashing(path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(hash::empty_content_hash());
        }
        let len = usize::try_from(len)
            .map_err(|_| io::Error::other("file too large to buffer on this platform"))?;
        let mut buf = vec![0u8; len];
        self.reader.read_full(&file, &mut buf)?;
        Ok(hash::content_hash(&buf))
    }
}

//! Positional-read fallback for platforms without io_uring.

use std::fs::File;
use std::io::{self, Read};

/// Stateless reader with the same surface as the Linux backend.
pub struct FileReader;

impl FileReader {
    /// Create a reader. Never fails on this backend; the signature matches
    /// the ring-owning variant.
    pub fn new() -> io::Result<Self> {
        Ok(Self)
    }

    /// Fill `buf` with the file's bytes starting at offset zero.
    pub fn read_full(&mut self, file: &File, buf: &mut [u8]) -> io::Result<()> {
        let mut handle = file;
        let mut filled = 0usize;
        while filled < buf.len() {
            match handle.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "file shrank while being read",
                    ));
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

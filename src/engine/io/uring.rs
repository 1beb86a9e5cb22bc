//! io_uring-backed whole-file reads (Linux).

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;

use io_uring::{IoUring, opcode, types};

/// Submission queue depth per worker ring. Only one read is ever in flight
/// at a time on a given ring.
const RING_DEPTH: u32 = 64;

/// Per-worker reader owning one `io_uring` instance for its lifetime.
///
/// Ring setup costs a syscall and kernel allocations, so workers reuse one
/// ring across every file they claim instead of building one per file.
pub struct FileReader {
    ring: IoUring,
}

impl FileReader {
    /// Create a reader with its own ring.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            ring: IoUring::new(RING_DEPTH)?,
        })
    }

    /// Fill `buf` with the file's bytes starting at offset zero.
    ///
    /// Exactly one read is submitted and awaited at a time. Short completions
    /// re-submit for the remainder at the right offset, so the assembled
    /// bytes are independent of how the kernel chunks the transfer. Reaching
    /// end-of-file before `buf` is full means the file shrank after it was
    /// sized and is reported as an error.
    pub fn read_full(&mut self, file: &File, buf: &mut [u8]) -> io::Result<()> {
        let fd = types::Fd(file.as_raw_fd());
        let mut filled = 0usize;
        while filled < buf.len() {
            let remainder = &mut buf[filled..];
            let len = u32::try_from(remainder.len()).unwrap_or(u32::MAX);
            let entry = opcode::Read::new(fd, remainder.as_mut_ptr(), len)
                .offset(filled as u64)
                .build();

            // SAFETY: the buffer outlives the request — submit_and_wait below
            // blocks until the kernel completes this read, and this ring never
            // carries more than one in-flight request.
            unsafe {
                self.ring
                    .submission()
                    .push(&entry)
                    .map_err(|_| io::Error::other("io_uring submission queue full"))?;
            }
            self.ring.submit_and_wait(1)?;

            let cqe = self
                .ring
                .completion()
                .next()
                .ok_or_else(|| io::Error::other("io_uring completion queue empty"))?;
            let res = cqe.result();
            if res < 0 {
                return Err(io::Error::from_raw_os_error(-res));
            }
            if res == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "file shrank while being read",
                ));
            }
            filled += res as usize;
        }
        Ok(())
    }
}

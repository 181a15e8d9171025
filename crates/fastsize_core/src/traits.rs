//! The forward-only byte source the detector reads from.

use std::io::{self, Read};

/// `Ok(0)` means the stream is exhausted. Timeouts are reported as
/// `ErrorKind::TimedOut` or `WouldBlock`.
pub trait StreamSource {
    fn read_chunk(&mut self, buffer: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read + ?Sized> StreamSource for R {
    #[inline]
    fn read_chunk(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.read(buffer)
    }
}

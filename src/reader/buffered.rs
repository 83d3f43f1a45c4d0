//! Buffered input window
//!
//! Reads XML from any source implementing `Read` into a single reusable
//! buffer. The unconsumed window `pos..end` survives every refill: it is
//! slid to the front of the buffer first, and the buffer doubles when the
//! window already fills it.

use std::io::{self, Read};
use tracing::debug;

/// Buffer size for reading chunks (1 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 16 * 16 * 4096;

/// Buffered input for streaming parsing
pub struct InputBuffer<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    pos: usize,
    end: usize,
    eof: bool,
    /// Stream offset of `buffer[0]`
    base: u64,
    total_bytes: u64,
    refills: u64,
}

impl<R: Read> InputBuffer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create with the given initial buffer capacity (at least one byte)
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        InputBuffer {
            reader,
            buffer: vec![0u8; capacity.max(1)],
            pos: 0,
            end: 0,
            eof: false,
            base: 0,
            total_bytes: 0,
            refills: 0,
        }
    }

    /// Append newly read bytes after the window
    ///
    /// Returns the number of bytes appended; 0 means the source is exhausted.
    /// Offsets into the window stay valid, absolute buffer positions do not.
    pub fn refill(&mut self) -> io::Result<usize> {
        if self.eof {
            return Ok(0);
        }

        // Compact: move remaining data to start
        if self.pos > 0 {
            self.buffer.copy_within(self.pos..self.end, 0);
            self.base += self.pos as u64;
            self.end -= self.pos;
            self.pos = 0;
        }

        if self.end == self.buffer.len() {
            let capacity = self.buffer.len() * 2;
            debug!(capacity, "growing input buffer");
            self.buffer.resize(capacity, 0);
        }

        let read = loop {
            match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.refills += 1;
        if read == 0 {
            self.eof = true;
        } else {
            self.end += read;
            self.total_bytes += read as u64;
        }
        debug!(read, window = self.end - self.pos, "refilled input buffer");
        Ok(read)
    }

    /// Current unconsumed window
    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.buffer[self.pos..self.end]
    }

    /// Bytes available without refilling
    #[inline]
    pub fn lookahead(&self) -> usize {
        self.end - self.pos
    }

    /// Consume n bytes from the window
    #[inline]
    pub fn consume(&mut self, n: usize) {
        self.pos += n.min(self.end - self.pos);
    }

    /// True once the source has reported end of stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Absolute stream offset of the cursor
    #[inline]
    pub fn position(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Bytes read from the source so far
    #[inline]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of refill calls, including the final one that hit end of stream
    #[inline]
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Current buffer capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most `chunk` bytes per call
    struct Chunked<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Chunked<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_refill_reads_source() {
        let data = b"<root>content</root>";
        let mut input = InputBuffer::new(Cursor::new(data.to_vec()));

        assert_eq!(input.refill().unwrap(), data.len());
        assert_eq!(input.window(), data);
        assert_eq!(input.refill().unwrap(), 0);
        assert!(input.is_eof());
        assert_eq!(input.total_bytes(), data.len() as u64);
    }

    #[test]
    fn test_refill_preserves_unconsumed_bytes() {
        let mut input = InputBuffer::with_capacity(
            Chunked {
                data: b"abcdefgh",
                chunk: 3,
            },
            4,
        );
        input.refill().unwrap();
        assert_eq!(input.window(), b"abc");
        input.consume(2);
        assert_eq!(input.position(), 2);

        input.refill().unwrap();
        assert_eq!(input.window(), b"cdef");
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn test_refill_grows_full_buffer() {
        let mut input = InputBuffer::with_capacity(
            Chunked {
                data: b"0123456789",
                chunk: 4,
            },
            4,
        );
        input.refill().unwrap();
        input.refill().unwrap();
        assert_eq!(input.window(), b"01234567");
        assert_eq!(input.capacity(), 8);
        assert_eq!(input.refills(), 2);
    }

    #[test]
    fn test_refill_error() {
        let mut input = InputBuffer::new(Failing);
        assert!(input.refill().is_err());
    }
}

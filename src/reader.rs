//! Byte source abstraction ([`Reader`]) plus two concrete implementations:
//! a fixed in-memory [`SliceReader`] and a blocking [`IoReader`] over any
//! [`std::io::Read`].

use crate::error::{Error, ErrorKind, Result};

/// Abstraction over a source of octets positioned at a cursor.
///
/// Implementations need only support the operations the codec actually
/// needs: peek/consume one byte, bulk-read N bytes, and (when knowable)
/// report how many bytes remain.
pub trait Reader<'r> {
    /// Peek at the next byte without consuming it, or `None` at end of input.
    fn peek_byte(&mut self) -> Result<Option<u8>>;

    /// Read and consume a single byte.
    fn read_byte(&mut self) -> Result<u8> {
        match self.peek_byte()? {
            Some(_) => {
                let mut buf = [0u8; 1];
                self.read_into(&mut buf)?;
                Ok(buf[0])
            }
            None => Err(self.error(ErrorKind::BufferUnderflow)),
        }
    }

    /// Read exactly `buf.len()` bytes into `buf`.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read exactly `len` bytes and return them as an owned vector.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Number of bytes remaining, if the source can report it (always true
    /// for [`SliceReader`]; a streaming reader over an unsized pipe may not
    /// know this and can return `None`).
    fn remaining_len(&self) -> Option<usize>;

    /// Current byte offset from the start of the source, used to annotate
    /// errors with position information.
    fn position(&self) -> usize;

    /// Build an [`Error`] annotated with this reader's current position.
    fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.position())
    }
}

/// A [`Reader`] over a fixed, fully-buffered in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'r> {
    data: &'r [u8],
    pos: usize,
}

impl<'r> SliceReader<'r> {
    /// Wrap `data` for reading from the start.
    pub fn new(data: &'r [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The unconsumed remainder of the underlying slice.
    pub fn remaining_slice(&self) -> &'r [u8] {
        &self.data[self.pos..]
    }

    /// Borrow the next `len` bytes without copying, advancing the cursor.
    pub fn read_slice(&mut self, len: usize) -> Result<&'r [u8]> {
        if self.pos + len > self.data.len() {
            return Err(self.error(ErrorKind::BufferUnderflow));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

impl<'r> Reader<'r> for SliceReader<'r> {
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.data.get(self.pos).copied())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let slice = self.read_slice(buf.len())?;
        buf.copy_from_slice(slice);
        Ok(())
    }

    fn remaining_len(&self) -> Option<usize> {
        Some(self.data.len() - self.pos)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A [`Reader`] over any blocking [`std::io::Read`] source, for callers
/// streaming from a pipe, socket, or file rather than holding the whole
/// payload in memory up front.
pub struct IoReader<R> {
    inner: R,
    pos: usize,
    peeked: Option<u8>,
}

impl<R: std::io::Read> IoReader<R> {
    /// Wrap a blocking reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pos: 0,
            peeked: None,
        }
    }

    fn fill_peek(&mut self) -> Result<()> {
        if self.peeked.is_none() {
            let mut buf = [0u8; 1];
            match self.inner.read(&mut buf) {
                Ok(0) => {}
                Ok(_) => self.peeked = Some(buf[0]),
                Err(_) => return Err(Error::at(ErrorKind::BufferUnderflow, self.pos)),
            }
        }
        Ok(())
    }
}

impl<R: std::io::Read> Reader<'static> for IoReader<R> {
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        self.fill_peek()?;
        Ok(self.peeked)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let mut written = 0;
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            written = 1;
            self.pos += 1;
        }
        while written < buf.len() {
            match self.inner.read(&mut buf[written..]) {
                Ok(0) => return Err(self.error(ErrorKind::BufferUnderflow)),
                Ok(n) => {
                    written += n;
                    self.pos += n;
                }
                Err(_) => return Err(self.error(ErrorKind::BufferUnderflow)),
            }
        }
        Ok(())
    }

    fn remaining_len(&self) -> Option<usize> {
        None
    }

    fn position(&self) -> usize {
        self.pos
    }
}

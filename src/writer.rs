//! Byte sink abstraction ([`Writer`]) plus a [`VecWriter`] implementation.

use crate::error::Result;

/// Abstraction over a destination that bytes can be appended to.
pub trait Writer {
    /// Append `bytes` to the end of the sink.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

/// A [`Writer`] that appends into an owned [`Vec<u8>`].
#[derive(Debug, Default, Clone)]
pub struct VecWriter {
    buf: Vec<u8>,
}

impl VecWriter {
    /// An empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// An empty writer with room reserved for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Consume the writer, returning the accumulated bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Borrow the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl Writer for VecWriter {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

impl Writer for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A [`Writer`] over any [`std::io::Write`] sink, mirroring [`crate::reader::IoReader`].
pub struct IoWriter<W> {
    inner: W,
}

impl<W: std::io::Write> IoWriter<W> {
    /// Wrap a blocking writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: std::io::Write> Writer for IoWriter<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner
            .write_all(bytes)
            .map_err(|_| crate::error::Error::new(crate::error::ErrorKind::BufferUnderflow))
    }
}

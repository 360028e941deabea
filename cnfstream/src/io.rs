//! Byte sources and sinks consumed by the parsers and writers.
//!
//! The parsers only ever pull bytes through [`Source`] and the writers only push bytes through
//! [`Sink`], so decompression, files, standard streams and in-memory buffers are all handled by
//! adapters implementing these traits.
use std::io;

pub mod chunk;
pub mod read;
pub mod write;

pub use read::ReadSource;
pub use write::WriteSink;

/// A source of input bytes.
pub trait Source {
    /// Reads up to `buf.len()` bytes into `buf` and returns the number of bytes read.
    ///
    /// Returning `0` for a non-empty `buf` indicates the end of the data.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Reads a single byte, returning `None` at the end of the data.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Returns whether all data was read.
    fn is_at_end(&mut self) -> io::Result<bool>;
}

/// A target for output bytes.
pub trait Sink {
    /// Writes all given bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Flushes any buffered bytes to the underlying device.
    fn flush(&mut self) -> io::Result<()>;
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(buf)
    }

    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline]
    fn is_at_end(&mut self) -> io::Result<bool> {
        (**self).is_at_end()
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Source reading from an in-memory byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    remaining: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Creates a source producing the given bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { remaining: bytes }
    }

    /// The bytes that were not read yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        SliceSource::new(text.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SliceSource::new(bytes)
    }
}

impl Source for SliceSource<'_> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.remaining.len());
        let (head, tail) = self.remaining.split_at(len);
        buf[..len].copy_from_slice(head);
        self.remaining = tail;
        Ok(len)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.remaining.split_first().map(|(&byte, tail)| {
            self.remaining = tail;
            byte
        }))
    }

    fn is_at_end(&mut self) -> io::Result<bool> {
        Ok(self.remaining.is_empty())
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

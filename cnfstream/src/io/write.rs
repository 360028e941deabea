//! Sinks backed by [`std::io::Write`] implementations.
use std::{fs::File, io, path::Path};

use flussab::DeferredWriter;

use super::Sink;

/// Sink writing into a [`flussab::DeferredWriter`].
///
/// The deferred writer buffers its output and holds on to IO errors until they are checked. Every
/// `write_bytes` and `flush` call checks for and reports such errors, so an error can surface one
/// call after the write that caused it.
pub struct WriteSink<'a> {
    target: DeferredWriter<'a>,
}

impl<'a> WriteSink<'a> {
    /// Creates a sink writing into a given [`flussab::DeferredWriter`].
    pub fn new(target: DeferredWriter<'a>) -> Self {
        WriteSink { target }
    }

    /// Creates a sink writing into any [`io::Write`] instance.
    pub fn from_write(write: impl io::Write + 'a) -> Self {
        Self::new(DeferredWriter::from_write(write))
    }
}

impl Sink for WriteSink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.target.write_all_defer_err(bytes);
        self.target.check_io_error()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.flush_defer_err();
        self.target.check_io_error()
    }
}

/// Creates (or truncates) a file and returns a sink writing into it.
pub fn create_file(path: impl AsRef<Path>) -> io::Result<WriteSink<'static>> {
    Ok(WriteSink::from_write(File::create(path)?))
}

/// Sink writing to the process's standard output.
pub fn stdout() -> WriteSink<'static> {
    WriteSink::from_write(io::stdout())
}

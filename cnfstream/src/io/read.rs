//! Sources backed by [`std::io`] readers, with transparent decompression.
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use bzip2::bufread::MultiBzDecoder;
use flate2::bufread::MultiGzDecoder;
use xz2::bufread::XzDecoder;

use super::Source;

/// Compression formats recognized by their magic bytes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Compression {
    /// Uncompressed data.
    None,
    /// gzip, possibly with multiple members.
    Gzip,
    /// bzip2, possibly with multiple streams.
    Bzip2,
    /// xz, possibly with multiple streams.
    Xz,
    /// Zstandard, possibly with multiple frames.
    Zstd,
}

impl Compression {
    const MAGIC: [(Compression, &'static [u8]); 4] = [
        (Compression::Gzip, &[0x1f, 0x8b]),
        (Compression::Bzip2, b"BZh"),
        (Compression::Xz, &[0xfd, b'7', b'z', b'X', b'Z', 0x00]),
        (Compression::Zstd, &[0x28, 0xb5, 0x2f, 0xfd]),
    ];

    /// Detects the compression format of data starting with `bytes`.
    pub fn detect(bytes: &[u8]) -> Compression {
        Self::MAGIC
            .iter()
            .find(|(_, magic)| bytes.starts_with(magic))
            .map_or(Compression::None, |&(compression, _)| compression)
    }
}

/// Source reading from a buffered reader.
pub struct ReadSource<R> {
    reader: R,
}

impl<R: BufRead> ReadSource<R> {
    /// Creates a source reading from the given buffered reader.
    pub fn new(reader: R) -> Self {
        ReadSource { reader }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<'a> ReadSource<Box<dyn BufRead + 'a>> {
    /// Creates a source that decompresses the reader's data if it starts with the magic bytes of a
    /// supported [`Compression`] format and passes it through unchanged otherwise.
    pub fn detect_compression(mut reader: impl BufRead + 'a) -> io::Result<Self> {
        let reader: Box<dyn BufRead + 'a> = match peek_compression(&mut reader)? {
            Compression::None => Box::new(reader),
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
            Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(reader))),
            Compression::Xz => Box::new(BufReader::new(XzDecoder::new_multi_decoder(reader))),
            Compression::Zstd => Box::new(BufReader::new(zstd::Decoder::with_buffer(reader)?)),
        };
        Ok(ReadSource::new(reader))
    }
}

/// Checks for magic bytes without consuming any input.
///
/// Only the bytes already buffered after a single refill are inspected, so an input delivering the
/// start of its magic separately from the rest is read as uncompressed.
fn peek_compression(reader: &mut impl BufRead) -> io::Result<Compression> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(Compression::detect(buf)),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

impl<R: BufRead> Source for ReadSource<R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Keep reading until the buffer is full or we hit EOF, as some readers (e.g. decoders)
        // return short reads long before the end.
        let mut len = 0;
        while len < buf.len() {
            match self.reader.read(&mut buf[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(len)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn is_at_end(&mut self) -> io::Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

/// Opens a file for reading, decompressing it if it is compressed.
pub fn open_file(path: impl AsRef<Path>) -> io::Result<ReadSource<Box<dyn BufRead>>> {
    let file = File::open(path)?;
    ReadSource::detect_compression(BufReader::new(file))
}

/// Source reading the process's standard input, decompressing it if it is compressed.
pub fn stdin() -> io::Result<ReadSource<Box<dyn BufRead>>> {
    ReadSource::detect_compression(io::stdin().lock())
}

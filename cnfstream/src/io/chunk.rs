//! Splitting a source's data into chunks that end at token boundaries.
use std::io;

use crate::scan::is_space;

use super::Source;

/// Rule deciding whether a chunk ending in a given byte may end there.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Boundary {
    /// Text formats: chunks end in whitespace, so no decimal token or `d` marker is split.
    Text,
    /// Binary DRAT: chunks end in a byte without continuation bit, so no varint is split.
    Binary,
}

impl Boundary {
    #[inline]
    fn is_boundary(self, last_byte: u8) -> bool {
        match self {
            Boundary::Text => is_space(last_byte),
            Boundary::Binary => last_byte & 0x80 == 0,
        }
    }
}

/// Reads chunks of roughly fixed size from a [`Source`].
///
/// After a physical read of up to `chunk_size` bytes, the chunk is extended one byte at a time
/// until it ends at a boundary or the source is exhausted. Bytes of a chunk that the consumer did
/// not [`consume`][Self::consume] are kept and form the start of the next chunk.
pub struct ChunkReader<S> {
    source: S,
    buf: Vec<u8>,
    chunk_size: usize,
    boundary: Boundary,
}

impl<S: Source> ChunkReader<S> {
    /// Creates a chunk reader reading from `source`.
    pub fn new(source: S, chunk_size: usize, boundary: Boundary) -> Self {
        ChunkReader {
            source,
            buf: vec![],
            chunk_size: chunk_size.max(1),
            boundary,
        }
    }

    /// Adds bytes in front of the next chunk, as if they were left unconsumed.
    pub fn unread(&mut self, bytes: &[u8]) {
        let mut buf = bytes.to_vec();
        buf.append(&mut self.buf);
        self.buf = buf;
    }

    /// Reads the next chunk.
    ///
    /// Returns `None` once the source is exhausted. Unconsumed bytes are not returned again at that
    /// point, they remain available through [`pending`][Self::pending].
    pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if self.source.is_at_end()? {
            return Ok(None);
        }

        let start = self.buf.len();
        self.buf.resize(start + self.chunk_size, 0);
        let len = match self.source.read_bytes(&mut self.buf[start..]) {
            Ok(len) => len,
            Err(err) => {
                self.buf.truncate(start);
                return Err(err);
            }
        };
        self.buf.truncate(start + len);

        while let Some(&last_byte) = self.buf.last() {
            if self.boundary.is_boundary(last_byte) {
                break;
            }
            match self.source.read_byte()? {
                Some(byte) => self.buf.push(byte),
                None => break,
            }
        }

        Ok(Some(&self.buf))
    }

    /// Marks the first `len` bytes of the current chunk as processed.
    pub fn consume(&mut self, len: usize) {
        self.buf.drain(..len);
    }

    /// Bytes read from the source but not yet consumed.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{tests::TrickleSource, SliceSource};

    fn chunks(input: &[u8], chunk_size: usize, boundary: Boundary) -> io::Result<Vec<Vec<u8>>> {
        let mut reader = ChunkReader::new(SliceSource::new(input), chunk_size, boundary);
        let mut result = vec![];
        while let Some(chunk) = reader.next_chunk()? {
            result.push(chunk.to_vec());
            let len = chunk.len();
            reader.consume(len);
        }
        Ok(result)
    }

    #[test]
    fn text_chunks_end_in_whitespace() -> io::Result<()> {
        assert_eq!(
            chunks(b"12 -345 0\nc x\n", 2, Boundary::Text)?,
            vec![
                b"12 ".to_vec(),
                b"-345 ".to_vec(),
                b"0\n".to_vec(),
                b"c ".to_vec(),
                b"x\n".to_vec(),
            ]
        );
        Ok(())
    }

    #[test]
    fn text_chunk_at_end_of_input() -> io::Result<()> {
        assert_eq!(
            chunks(b"1 20", 3, Boundary::Text)?,
            vec![b"1 20".to_vec()]
        );
        Ok(())
    }

    #[test]
    fn binary_chunks_end_after_varint() -> io::Result<()> {
        assert_eq!(
            chunks(&[0x61, 0x83, 0x80, 0x01, 0x00], 2, Boundary::Binary)?,
            vec![vec![0x61, 0x83, 0x80, 0x01], vec![0x00]]
        );
        Ok(())
    }

    #[test]
    fn keeps_unconsumed_bytes() -> io::Result<()> {
        let mut source = TrickleSource::new(b"ab cd ", 1);
        let mut reader = ChunkReader::new(&mut source, 1, Boundary::Text);
        reader.unread(b"x");

        assert_eq!(reader.next_chunk()?, Some(&b"xab "[..]));
        reader.consume(1);
        assert_eq!(reader.pending(), b"ab ");
        assert_eq!(reader.next_chunk()?, Some(&b"ab cd "[..]));
        reader.consume(6);
        assert_eq!(reader.next_chunk()?, None);
        assert!(reader.pending().is_empty());
        Ok(())
    }
}

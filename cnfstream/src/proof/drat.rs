//! Writers for the DRAT clausal proof file format.
use crate::{
    drat::{
        binary::{ADD_MARKER, DELETE_MARKER, END_MARKER},
        varint,
    },
    error::WriteError,
    io::Sink,
    lit::Lit,
};

use super::{Format, Proof};

/// Writer for the text based DRAT clausal proof file format.
pub struct DratTextWriter<S> {
    sink: S,
    buf: Vec<u8>,
}

impl<S: Sink> DratTextWriter<S> {
    /// Creates a new writer writing into a given sink.
    pub fn new(sink: S) -> Self {
        DratTextWriter { sink, buf: vec![] }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn write_clause(&mut self, prefix: &[u8], lits: &[Lit]) -> Result<(), WriteError> {
        self.buf.clear();
        self.buf.extend_from_slice(prefix);
        for &lit in lits {
            itoap::write_to_vec(&mut self.buf, lit.to_dimacs()?);
            self.buf.push(b' ');
        }
        self.buf.extend_from_slice(b"0\n");
        self.sink.write_bytes(&self.buf)?;
        Ok(())
    }
}

impl<S: Sink> Proof for DratTextWriter<S> {
    fn add_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        self.write_clause(b"", lits)
    }

    fn delete_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        self.write_clause(b"d ", lits)
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        Ok(self.sink.flush()?)
    }
}

/// Writer for the binary DRAT clausal proof file format.
pub struct DratBinaryWriter<S> {
    sink: S,
    buf: Vec<u8>,
}

impl<S: Sink> DratBinaryWriter<S> {
    /// Creates a new writer writing into a given sink.
    pub fn new(sink: S) -> Self {
        DratBinaryWriter { sink, buf: vec![] }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn write_clause(&mut self, marker: u8, lits: &[Lit]) -> Result<(), WriteError> {
        self.buf.clear();
        self.buf.push(marker);
        for &lit in lits {
            varint::encode_lit(lit, &mut self.buf)?;
        }
        self.buf.push(END_MARKER);
        self.sink.write_bytes(&self.buf)?;
        Ok(())
    }
}

impl<S: Sink> Proof for DratBinaryWriter<S> {
    fn add_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        self.write_clause(ADD_MARKER, lits)
    }

    fn delete_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        self.write_clause(DELETE_MARKER, lits)
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        Ok(self.sink.flush()?)
    }
}

/// Writer for DRAT proofs in a format selected at runtime.
pub enum DratWriter<S> {
    /// Writes text DRAT.
    Text(DratTextWriter<S>),
    /// Writes binary DRAT.
    Binary(DratBinaryWriter<S>),
}

impl<S: Sink> DratWriter<S> {
    /// Creates a new writer writing the given format into a given sink.
    pub fn new(sink: S, format: Format) -> Self {
        match format {
            Format::Text => DratWriter::Text(DratTextWriter::new(sink)),
            Format::Binary => DratWriter::Binary(DratBinaryWriter::new(sink)),
        }
    }

    /// The format written by this writer.
    pub fn format(&self) -> Format {
        match self {
            DratWriter::Text(_) => Format::Text,
            DratWriter::Binary(_) => Format::Binary,
        }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> S {
        match self {
            DratWriter::Text(writer) => writer.into_inner(),
            DratWriter::Binary(writer) => writer.into_inner(),
        }
    }
}

impl<S: Sink> Proof for DratWriter<S> {
    fn add_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        match self {
            DratWriter::Text(writer) => writer.add_clause(lits),
            DratWriter::Binary(writer) => writer.add_clause(lits),
        }
    }

    fn delete_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        match self {
            DratWriter::Text(writer) => writer.delete_clause(lits),
            DratWriter::Binary(writer) => writer.delete_clause(lits),
        }
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        match self {
            DratWriter::Text(writer) => writer.flush(),
            DratWriter::Binary(writer) => writer.flush(),
        }
    }
}

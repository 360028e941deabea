//! Chunked parser for binary DRAT proofs.
use crate::{error::ParseError, lit::Lit};

use super::{
    varint::{decode_lit, VarintError},
    ProofStep,
};

/// Byte starting an added clause.
pub const ADD_MARKER: u8 = b'a';
/// Byte starting a deleted clause.
pub const DELETE_MARKER: u8 = b'd';
/// Byte terminating a clause.
pub const END_MARKER: u8 = 0;

/// Resumable parser for a binary DRAT proof delivered in chunks.
///
/// Every clause is a marker byte ([`ADD_MARKER`] or [`DELETE_MARKER`]), a sequence of varint
/// encoded literals and an [`END_MARKER`]. Markers are only recognized between clauses, within a
/// clause every non-zero byte starts a literal.
///
/// Chunks may split a proof between any two literals, but not within a literal.
#[derive(Default)]
pub struct BinaryChunkParser {
    clause: Vec<Lit>,
    in_clause: bool,
    is_addition: bool,
    clause_count: usize,
    offset: u64,
}

impl BinaryChunkParser {
    /// Creates a parser at the start of a proof.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of terminated clauses.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Offset of the next unconsumed byte in the input stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Parses the proof steps in `chunk[start..]`, calling `on_step` for every terminated clause.
    ///
    /// Always consumes the whole chunk and returns its length.
    pub fn parse<E: From<ParseError>>(
        &mut self,
        chunk: &[u8],
        start: usize,
        mut on_step: impl FnMut(ProofStep) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut pos = start;

        while let Some(&byte) = chunk.get(pos) {
            if !self.in_clause {
                self.is_addition = match byte {
                    ADD_MARKER => true,
                    DELETE_MARKER => false,
                    _ => {
                        return Err(self
                            .error(start, pos, "clause not preceded by 'a' or 'd'")
                            .into())
                    }
                };
                self.in_clause = true;
                pos += 1;
            } else if byte == END_MARKER {
                on_step(ProofStep {
                    is_addition: self.is_addition,
                    lits: &self.clause,
                })?;
                self.clause.clear();
                self.in_clause = false;
                self.clause_count += 1;
                pos += 1;
            } else {
                match decode_lit(&chunk[pos..]) {
                    Ok((lit, len)) => {
                        self.clause.push(lit);
                        pos += len;
                    }
                    Err(err) => return Err(self.varint_error(start, pos, err).into()),
                }
            }
        }

        self.offset += (pos - start) as u64;
        Ok(pos)
    }

    /// Checks the end of a binary DRAT proof.
    pub fn finish(&self) -> Result<(), ParseError> {
        if self.in_clause {
            return Err(ParseError::syntax(
                self.offset,
                "unexpected end of proof within a clause",
            ));
        }
        Ok(())
    }

    fn varint_error(&self, start: usize, pos: usize, err: VarintError) -> ParseError {
        self.error(start, pos, err.to_string())
    }

    fn error(&self, start: usize, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.offset + (pos - start) as u64, message)
    }
}

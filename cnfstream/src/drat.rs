//! The DRAT clausal proof format.
//!
//! A DRAT proof is a sequence of clause additions and deletions. In the text format, each step is
//! a DIMACS style clause, prefixed with `d` for deletions. The binary format is described in
//! [`binary`].
use std::path::Path;

use bstr::BStr;

use crate::{
    config::Config,
    error::ParseError,
    io::{
        chunk::{Boundary, ChunkReader},
        read, SliceSource, Source,
    },
    lit::Lit,
    log::{debug, trace, verbose},
    text::{Mode, TextChunkParser},
};

pub mod binary;
pub mod varint;

use binary::BinaryChunkParser;

/// A single step of a DRAT proof.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ProofStep<'a> {
    /// Whether the clause is added, otherwise it is deleted.
    pub is_addition: bool,
    /// The literals of the clause.
    pub lits: &'a [Lit],
}

/// Encoding of a DRAT proof.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Format {
    /// Text format using DIMACS style clauses.
    Text,
    /// Binary format using variable length encoded literals.
    Binary,
}

/// Common interface of the text and binary chunk parsers used by the drivers.
trait BodyParser {
    fn parse_chunk<E: From<ParseError>>(
        &mut self,
        chunk: &[u8],
        on_step: impl FnMut(ProofStep) -> Result<(), E>,
    ) -> Result<usize, E>;

    fn finish(&self) -> Result<(), ParseError>;

    fn offset(&self) -> u64;

    fn clause_count(&self) -> usize;
}

impl BodyParser for TextChunkParser {
    fn parse_chunk<E: From<ParseError>>(
        &mut self,
        chunk: &[u8],
        on_step: impl FnMut(ProofStep) -> Result<(), E>,
    ) -> Result<usize, E> {
        self.parse(chunk, 0, on_step)
    }

    fn finish(&self) -> Result<(), ParseError> {
        self.finish_drat()
    }

    fn offset(&self) -> u64 {
        self.offset()
    }

    fn clause_count(&self) -> usize {
        self.clause_count()
    }
}

impl BodyParser for BinaryChunkParser {
    fn parse_chunk<E: From<ParseError>>(
        &mut self,
        chunk: &[u8],
        on_step: impl FnMut(ProofStep) -> Result<(), E>,
    ) -> Result<usize, E> {
        self.parse(chunk, 0, on_step)
    }

    fn finish(&self) -> Result<(), ParseError> {
        BinaryChunkParser::finish(self)
    }

    fn offset(&self) -> u64 {
        self.offset()
    }

    fn clause_count(&self) -> usize {
        self.clause_count()
    }
}

/// Parses a text DRAT proof read from `source`, calling `on_step` for every proof step.
///
/// Returns the number of proof steps. Errors returned by `on_step` abort parsing and are passed
/// through.
pub fn parse_drat_text<E: From<ParseError>>(
    source: impl Source,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    parse_drat(source, Format::Text, on_step)
}

/// Parses a binary DRAT proof read from `source`, see [`parse_drat_text`].
pub fn parse_drat_binary<E: From<ParseError>>(
    source: impl Source,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    parse_drat(source, Format::Binary, on_step)
}

/// Parses a DRAT proof of the given format read from `source`, see [`parse_drat_text`].
pub fn parse_drat<E: From<ParseError>>(
    source: impl Source,
    format: Format,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    parse_drat_with(source, format, &Config::default(), on_step)
}

/// Parses a DRAT proof of the given format using the given configuration.
pub fn parse_drat_with<E: From<ParseError>>(
    source: impl Source,
    format: Format,
    config: &Config,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    verbose!(config, "parsing DRAT proof", = format);
    match format {
        Format::Text => drive(
            TextChunkParser::new(Mode::Drat),
            ChunkReader::new(source, config.chunk_size(), Boundary::Text),
            config,
            on_step,
        ),
        Format::Binary => drive(
            BinaryChunkParser::new(),
            ChunkReader::new(source, config.chunk_size(), Boundary::Binary),
            config,
            on_step,
        ),
    }
}

fn drive<E: From<ParseError>>(
    mut parser: impl BodyParser,
    mut chunks: ChunkReader<impl Source>,
    config: &Config,
    mut on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    while let Some(chunk) = chunks.next_chunk().map_err(ParseError::from)? {
        trace!(config, "chunk", offset = parser.offset(), len = chunk.len());
        let end = parser.parse_chunk(chunk, &mut on_step)?;
        chunks.consume(end);
    }

    if !chunks.pending().is_empty() {
        return Err(ParseError::syntax(
            parser.offset(),
            format!(
                "unexpected end of proof after {:?}",
                <&BStr>::from(chunks.pending())
            ),
        )
        .into());
    }
    parser.finish()?;

    debug!(config, "parsed", steps = parser.clause_count(), bytes = parser.offset());
    Ok(parser.clause_count())
}

/// Parses a text DRAT proof given as a string.
pub fn parse_drat_str<E: From<ParseError>>(
    input: &str,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    parse_drat(SliceSource::from(input), Format::Text, on_step)
}

/// Parses a DRAT proof of the given format held in memory.
pub fn parse_drat_bytes<E: From<ParseError>>(
    bytes: &[u8],
    format: Format,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    parse_drat(SliceSource::new(bytes), format, on_step)
}

/// Parses a DRAT proof file of the given format, which may be compressed.
pub fn parse_drat_file<E: From<ParseError>>(
    path: impl AsRef<Path>,
    format: Format,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    let source = read::open_file(path).map_err(ParseError::from)?;
    parse_drat(source, format, on_step)
}

/// Parses a DRAT proof of the given format from standard input, which may be compressed.
pub fn parse_drat_stdin<E: From<ParseError>>(
    format: Format,
    on_step: impl FnMut(ProofStep) -> Result<(), E>,
) -> Result<usize, E> {
    let source = read::stdin().map_err(ParseError::from)?;
    parse_drat(source, format, on_step)
}

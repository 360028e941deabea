//! Reading DIMACS CNF files from sources.
use std::{io, path::Path};

use bstr::BStr;

use crate::{
    config::Config,
    drat::ProofStep,
    error::ParseError,
    io::{
        chunk::{Boundary, ChunkReader},
        read, SliceSource, Source,
    },
    lit::Lit,
    log::{debug, trace, verbose},
    scan::skip_whitespace,
    text::{Mode, TextChunkParser},
};

use super::{parse_header, Header};

/// Parses a DIMACS CNF file read from `source`, calling `on_clause` for every clause.
///
/// Returns the file's header after checking that the number of clauses matches it. Errors returned
/// by `on_clause` abort parsing and are passed through.
pub fn parse_cnf<E: From<ParseError>>(
    source: impl Source,
    on_clause: impl FnMut(&[Lit]) -> Result<(), E>,
) -> Result<Header, E> {
    parse_cnf_with(source, &Config::default(), on_clause)
}

/// Parses a DIMACS CNF file read from `source` using the given configuration.
///
/// See [`parse_cnf`].
pub fn parse_cnf_with<E: From<ParseError>>(
    mut source: impl Source,
    config: &Config,
    mut on_clause: impl FnMut(&[Lit]) -> Result<(), E>,
) -> Result<Header, E> {
    let prefix = read_header_lines(&mut source).map_err(ParseError::from)?;
    let header = parse_header(&prefix)?;
    verbose!(
        config,
        "header",
        variables = header.var_count,
        clauses = header.clause_count
    );

    let mut parser = TextChunkParser::new(Mode::Cnf);
    let mut on_step = |step: ProofStep| on_clause(step.lits);

    parser.advance_offset(header.len);
    let end = parser.parse(&prefix, header.len, &mut on_step)?;

    let mut chunks = ChunkReader::new(source, config.chunk_size(), Boundary::Text);
    chunks.unread(&prefix[end..]);

    while let Some(chunk) = chunks.next_chunk().map_err(ParseError::from)? {
        trace!(config, "chunk", offset = parser.offset(), len = chunk.len());
        let end = parser.parse(chunk, 0, &mut on_step)?;
        chunks.consume(end);
    }

    if !chunks.pending().is_empty() {
        return Err(ParseError::syntax(
            parser.offset(),
            format!(
                "unexpected end of input after {:?}",
                <&BStr>::from(chunks.pending())
            ),
        )
        .into());
    }
    parser.finish_cnf(&header)?;

    debug!(config, "parsed", clauses = parser.clause_count(), bytes = parser.offset());
    Ok(header)
}

/// Reads everything up to and including the line that should contain the header.
///
/// Lines that are blank or comments are read as well, as they may precede the header. The result
/// ends with the header line's newline, if it has one.
fn read_header_lines(source: &mut impl Source) -> io::Result<Vec<u8>> {
    let mut prefix = vec![];
    loop {
        let line_start = prefix.len();
        while let Some(byte) = source.read_byte()? {
            prefix.push(byte);
            if byte == b'\n' {
                break;
            }
        }

        let content = line_start + skip_whitespace(&prefix[line_start..], 0);
        let is_filler = content == prefix.len() || prefix[content] == b'c';
        if !is_filler || source.is_at_end()? {
            return Ok(prefix);
        }
    }
}

/// Parses a DIMACS CNF file given as a string.
pub fn parse_cnf_str<E: From<ParseError>>(
    input: &str,
    on_clause: impl FnMut(&[Lit]) -> Result<(), E>,
) -> Result<Header, E> {
    parse_cnf(SliceSource::from(input), on_clause)
}

/// Parses a DIMACS CNF file, which may be compressed.
pub fn parse_cnf_file<E: From<ParseError>>(
    path: impl AsRef<Path>,
    on_clause: impl FnMut(&[Lit]) -> Result<(), E>,
) -> Result<Header, E> {
    let source = read::open_file(path).map_err(ParseError::from)?;
    parse_cnf(source, on_clause)
}

/// Parses a DIMACS CNF file from standard input, which may be compressed.
pub fn parse_cnf_stdin<E: From<ParseError>>(
    on_clause: impl FnMut(&[Lit]) -> Result<(), E>,
) -> Result<Header, E> {
    let source = read::stdin().map_err(ParseError::from)?;
    parse_cnf(source, on_clause)
}

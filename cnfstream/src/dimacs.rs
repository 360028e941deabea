//! The DIMACS CNF file format.
//!
//! A DIMACS CNF file starts with a `p cnf <variables> <clauses>` header, optionally preceded by
//! comment lines. The header is followed by the clauses, each given as a sequence of non-zero
//! literals terminated by `0`. Clauses can span lines and multiple clauses can share a line.
use bstr::BStr;

use crate::{
    error::ParseError,
    scan::{is_space, scan_int, skip_comments, skip_whitespace, token_end, IntToken},
};

pub mod cnf;

/// Header data of a DIMACS CNF file.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Header {
    /// Number of variables given in the header.
    ///
    /// This is informational only, literals of larger variables are accepted.
    pub var_count: usize,
    /// Number of clauses given in the header.
    pub clause_count: usize,
    /// Offset of the first byte following the header.
    pub len: usize,
}

/// Parses the header at the start of `bytes`.
///
/// Leading whitespace and comment lines are skipped. Anything following the clause count (after a
/// whitespace byte) is left for the body, see [`Header::len`].
pub fn parse_header(bytes: &[u8]) -> Result<Header, ParseError> {
    let (pos, _) = skip_comments(bytes, 0);

    match bytes.get(pos) {
        Some(b'p') => (),
        Some(_) => return Err(unexpected(bytes, pos, "\"p cnf\" header")),
        None => return Err(ParseError::syntax(pos as u64, "missing \"p cnf\" header")),
    }
    let pos = expect_space(bytes, pos + 1)?;

    if !bytes[pos..].starts_with(b"cnf") {
        return Err(unexpected(bytes, pos, "\"cnf\""));
    }
    let pos = expect_space(bytes, pos + 3)?;

    let (var_count, pos) = parse_count(bytes, pos, "variable count")?;
    let pos = expect_space(bytes, pos)?;
    let (clause_count, len) = parse_count(bytes, pos, "clause count")?;

    Ok(Header {
        var_count,
        clause_count,
        len,
    })
}

fn unexpected(bytes: &[u8], pos: usize, expected: &str) -> ParseError {
    let token = <&BStr>::from(&bytes[pos..token_end(bytes, pos)]);
    ParseError::syntax(
        pos as u64,
        format!("unexpected {:?}, expected {}", token, expected),
    )
}

/// Requires at least one whitespace byte at `pos` and skips all of them.
fn expect_space(bytes: &[u8], pos: usize) -> Result<usize, ParseError> {
    match bytes.get(pos) {
        Some(&byte) if is_space(byte) => Ok(skip_whitespace(bytes, pos)),
        Some(_) => Err(unexpected(bytes, pos, "whitespace")),
        None => Err(ParseError::syntax(pos as u64, "incomplete header")),
    }
}

fn parse_count(bytes: &[u8], pos: usize, name: &str) -> Result<(usize, usize), ParseError> {
    match bytes.get(pos) {
        None => {
            return Err(ParseError::syntax(
                pos as u64,
                format!("missing {} in header", name),
            ))
        }
        Some(b'-') => return Err(unexpected(bytes, pos, name)),
        Some(_) => (),
    }
    match scan_int(bytes, pos) {
        IntToken::Value(value, end) => match value.and_then(|value| usize::try_from(value).ok()) {
            Some(count) => Ok((count, end)),
            None => Err(ParseError::syntax(
                pos as u64,
                format!("{} {} too large", name, <&BStr>::from(&bytes[pos..end])),
            )),
        },
        IntToken::Incomplete | IntToken::Invalid(_) => Err(unexpected(bytes, pos, name)),
    }
}

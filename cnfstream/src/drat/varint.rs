//! Variable length encoding of literals in binary DRAT proofs.
//!
//! A literal is mapped to the unsigned integer `2 * v + s`, where `v` is its DIMACS variable number
//! and `s` is `1` for negative literals. This integer is stored little-endian in groups of 7 bits,
//! one group per byte, with the high bit of a byte set when more bytes follow.
use thiserror::Error;

use crate::lit::{DimacsError, Lit, LitIdx};

/// Maximal number of bytes of an encoded literal.
pub const MAX_LEN: usize = 5;

/// Error decoding a binary DRAT literal.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum VarintError {
    /// The bytes end before the final byte of the literal.
    #[error("unexpected end of binary literal")]
    Truncated,
    /// The encoded value does not fit into 32 bits.
    #[error("binary literal out of range")]
    OutOfRange,
    /// The encoded value refers to the non-existent variable 0.
    #[error("binary literal of invalid variable 0")]
    ReservedVariable,
}

/// Decodes the literal at the start of `bytes`.
///
/// Returns the literal and the number of bytes it occupies.
pub fn decode_lit(bytes: &[u8]) -> Result<(Lit, usize), VarintError> {
    let mut raw: u32 = 0;
    let mut len = 0;

    loop {
        let byte = *bytes.get(len).ok_or(VarintError::Truncated)?;
        if len == MAX_LEN - 1 && byte & 0xf0 != 0 {
            return Err(VarintError::OutOfRange);
        }
        raw |= ((byte & 0x7f) as u32) << (7 * len);
        len += 1;
        if byte & 0x80 == 0 {
            break;
        }
    }

    let var_number = raw >> 1;
    if var_number == 0 {
        return Err(VarintError::ReservedVariable);
    }
    let index: LitIdx = var_number - 1;
    Ok((Lit::from_index(index, raw & 1 == 0), len))
}

/// Appends the encoding of `lit` to `out`.
///
/// Fails exactly for literals without a DIMACS representation.
pub fn encode_lit(lit: Lit, out: &mut Vec<u8>) -> Result<(), DimacsError> {
    let mut raw = lit.var().to_dimacs()? as u32 * 2 + lit.is_negative() as u32;
    while raw > 0x7f {
        out.push((raw & 0x7f) as u8 | 0x80);
        raw >>= 7;
    }
    out.push(raw as u8);
    Ok(())
}

//! Errors reported by the parsers and writers.
use thiserror::Error;

use crate::lit::DimacsError;

/// Error while parsing a DIMACS CNF file or a DRAT proof.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input is malformed.
    #[error("syntax error at byte {offset}: {message}")]
    SyntaxError {
        /// Byte offset in the (decompressed) input where the error was detected.
        offset: u64,
        /// Description of the encountered error.
        message: String,
    },
    /// IO error while reading the input.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn syntax(offset: u64, message: impl Into<String>) -> Self {
        ParseError::SyntaxError {
            offset,
            message: message.into(),
        }
    }
}

/// Error while writing a DRAT proof.
#[derive(Error, Debug)]
pub enum WriteError {
    /// A literal of the clause has no representation in the output format.
    #[error(transparent)]
    OutOfRange(#[from] DimacsError),
    /// IO error while writing the output.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

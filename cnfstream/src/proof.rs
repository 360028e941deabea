//! Proof logging
use crate::{error::WriteError, lit::Lit};

pub mod drat;

pub use crate::drat::Format;

/// Trait implemented by proof format writers.
pub trait Proof {
    /// Logs the addition of a clause.
    fn add_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError>;

    /// Logs the removal of a clause.
    fn delete_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError>;

    /// Flushes any buffered proof steps to the underlying sink.
    fn flush(&mut self) -> Result<(), WriteError>;
}

impl<P: Proof + ?Sized> Proof for &mut P {
    fn add_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        (**self).add_clause(lits)
    }

    fn delete_clause(&mut self, lits: &[Lit]) -> Result<(), WriteError> {
        (**self).delete_clause(lits)
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        (**self).flush()
    }
}

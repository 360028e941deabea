//! Literals and variables.

use std::{fmt, ops};

use static_assertions::assert_eq_size;
use thiserror::Error;

/// The backing type used to represent literals and variables.
pub type LitIdx = u32;

/// Signed integer with the same size and alignment of `LitIdx`.
///
/// This is the type of literals in the DIMACS representation.
pub type SignedLitIdx = i32;

/// Error converting between literals and their DIMACS representation.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum DimacsError {
    /// The value is `0` (the clause terminator) or `SignedLitIdx::MIN`.
    #[error("invalid DIMACS literal {0}")]
    InvalidLiteral(i64),
    /// The variable's DIMACS number does not fit into a `SignedLitIdx`.
    #[error("variable index {0} is outside the DIMACS range")]
    OutOfRange(LitIdx),
}

/// A Boolean variable.
///
/// Internally Boolean variables are numbered starting from 0. This number is called the variable's
/// index.
///
/// For user I/O (including `Debug`) variables are numbered in the same order, but starting from 1.
/// This allows representing a negated variable using a negative integer which is the convention
/// also used by the DIMACS CNF and DRAT formats. Internally we call this number the DIMACS index or
/// just DIMACS, but avoid using it for anything besides user I/O.
///
/// There can be up to `Var::MAX_VAR_COUNT` variables numbered `0` to `Var::MAX_INDEX`, which leaves
/// space for the polarity bit of a `Lit` in a single `LitIdx`. Only the variables below
/// `Var::MAX_INDEX` have a DIMACS representation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    index: LitIdx,
}

assert_eq_size!(Var, LitIdx);

impl Var {
    /// The largest supported index of a variable.
    pub const MAX_INDEX: LitIdx = LitIdx::MAX >> 1;

    /// The number of representable variables.
    ///
    /// Exactly `Var::MAX_INDEX + 1`.
    pub const MAX_VAR_COUNT: usize = Var::MAX_INDEX as usize + 1;

    /// The largest 1-based DIMACS index of a variable.
    pub const MAX_DIMACS: SignedLitIdx = SignedLitIdx::MAX;

    /// Variable of a given index.
    ///
    /// Panics when the index is larger than `Var::MAX_INDEX`.
    #[inline]
    pub fn from_index(index: LitIdx) -> Var {
        assert!(index <= Var::MAX_INDEX);
        Var { index }
    }

    /// Index of this variable.
    #[inline]
    pub const fn index(self) -> LitIdx {
        self.index
    }

    /// The variable with the next larger index.
    ///
    /// This performs no bounds checking, staying in range is up to the caller.
    #[inline]
    pub const fn next(self) -> Var {
        Var {
            index: self.index.wrapping_add(1),
        }
    }

    /// The variable with the next smaller index.
    ///
    /// This performs no bounds checking, staying in range is up to the caller.
    #[inline]
    pub const fn prev(self) -> Var {
        Var {
            index: self.index.wrapping_sub(1),
        }
    }

    /// Variable given in the representation used by the DIMACS formats.
    ///
    /// Fails if the number is not strictly positive.
    #[inline]
    pub fn from_dimacs(number: SignedLitIdx) -> Result<Var, DimacsError> {
        if number <= 0 {
            return Err(DimacsError::InvalidLiteral(number as i64));
        }
        Ok(Var {
            index: (number - 1) as LitIdx,
        })
    }

    /// Representation used in the DIMACS formats.
    ///
    /// Fails for `Var::MAX_INDEX`, the only index whose DIMACS number exceeds `Var::MAX_DIMACS`.
    #[inline]
    pub fn to_dimacs(self) -> Result<SignedLitIdx, DimacsError> {
        if self.index >= Var::MAX_DIMACS as LitIdx {
            return Err(DimacsError::OutOfRange(self.index));
        }
        Ok(self.index as SignedLitIdx + 1)
    }

    /// Representation used in the DIMACS formats, widened so it exists for every variable.
    #[inline]
    pub fn dimacs(self) -> i64 {
        self.index as i64 + 1
    }
}

/// As in the DIMACS CNF format.
impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.dimacs(), f)
    }
}

/// As in the DIMACS CNF format.
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A Boolean literal.
///
/// A literal is a variable or the negation of a variable.
///
/// Internally a literal is represented as an integer that is two times the index of its variable
/// when it is negative or one more when it is positive. This integer is called the `code` or
/// encoding of the literal.
///
/// Literals are ordered by their code. All literals of a variable come before the literals of
/// variables with a larger index, and the negative literal of a variable comes right before the
/// positive one.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit {
    code: LitIdx,
}

assert_eq_size!(Lit, LitIdx);

impl Lit {
    /// The largest supported code of a literal.
    ///
    /// Equal to `2 * Var::MAX_INDEX + 1`, i.e. every `LitIdx` is a valid code.
    pub const MAX_CODE: LitIdx = 2 * Var::MAX_INDEX + 1;

    /// A literal for a given variable.
    ///
    /// A positive literal if the second parameter is `true`, a negative literal otherwise.
    #[inline]
    pub const fn from_var(var: Var, positive: bool) -> Lit {
        Lit {
            code: (var.index << 1) | (positive as LitIdx),
        }
    }

    /// A literal for the variable of a given index.
    ///
    /// Convenience method for the often needed `Lit::from_var(Var::from_index(index), positive)`.
    #[inline]
    pub fn from_index(index: LitIdx, positive: bool) -> Lit {
        Lit::from_var(Var::from_index(index), positive)
    }

    /// A literal with a given encoding.
    #[inline]
    pub const fn from_code(code: LitIdx) -> Lit {
        Lit { code }
    }

    /// Literal given in the representation used by the DIMACS formats.
    ///
    /// Fails for `0`, which terminates clauses, and for `SignedLitIdx::MIN`, whose magnitude is not
    /// representable.
    #[inline]
    pub fn from_dimacs(number: SignedLitIdx) -> Result<Lit, DimacsError> {
        if number == 0 || number == SignedLitIdx::MIN {
            return Err(DimacsError::InvalidLiteral(number as i64));
        }
        let var = Var::from_dimacs(number.abs())?;
        Ok(Lit::from_var(var, number > 0))
    }

    /// Encoding of this literal.
    #[inline]
    pub const fn code(self) -> LitIdx {
        self.code
    }

    /// The variable of this literal.
    #[inline]
    pub const fn var(self) -> Var {
        Var {
            index: self.code >> 1,
        }
    }

    /// Index of this literal's variable.
    #[inline]
    pub const fn index(self) -> LitIdx {
        self.code >> 1
    }

    /// Whether this is a positive literal.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.code & 1 != 0
    }

    /// Whether this is a negative literal.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.code & 1 == 0
    }

    /// The literal with the next larger code.
    ///
    /// Alternates between polarities: the successor of a negative literal is the positive literal
    /// of the same variable, the successor of a positive literal is the negative literal of the
    /// next variable. Performs no bounds checking.
    #[inline]
    pub const fn next(self) -> Lit {
        Lit {
            code: self.code.wrapping_add(1),
        }
    }

    /// The literal with the next smaller code, see [`Lit::next`].
    #[inline]
    pub const fn prev(self) -> Lit {
        Lit {
            code: self.code.wrapping_sub(1),
        }
    }

    /// The literal of the next variable with the same polarity.
    #[inline]
    pub const fn next_with_same_sign(self) -> Lit {
        Lit {
            code: self.code.wrapping_add(2),
        }
    }

    /// The literal of the previous variable with the same polarity.
    #[inline]
    pub const fn prev_with_same_sign(self) -> Lit {
        Lit {
            code: self.code.wrapping_sub(2),
        }
    }

    /// Representation used in the DIMACS formats.
    ///
    /// Fails when the variable has no DIMACS representation, see [`Var::to_dimacs`].
    #[inline]
    pub fn to_dimacs(self) -> Result<SignedLitIdx, DimacsError> {
        let number = self.var().to_dimacs()?;
        Ok(if self.is_positive() { number } else { -number })
    }

    /// Representation used in the DIMACS formats, widened so it exists for every literal.
    #[inline]
    pub fn dimacs(self) -> i64 {
        self.var().dimacs() * if self.is_positive() { 1 } else { -1 }
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Self::Output {
        Lit {
            code: self.code ^ 1,
        }
    }
}

impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    /// Negates the literal when `rhs` is `true`.
    #[inline]
    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit {
            code: self.code ^ (rhs as LitIdx),
        }
    }
}

/// As in the DIMACS CNF format.
impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.dimacs(), f)
    }
}

/// As in the DIMACS CNF format.
impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

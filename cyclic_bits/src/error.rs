#[cfg(feature = "std")]
use thiserror::Error;

/// Broad category of a [`BitsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A bit index or range fell outside `[0, len)`.
    Index,
    /// Words and bit length disagree, or two operands have incompatible shapes.
    ContractViolation,
    /// An argument was outside the domain the operation accepts.
    InvalidArgument,
}

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitsError {
    #[cfg_attr(feature = "std", error("Index {0} is out of bounds for length {1}"))]
    IndexOutOfBounds(usize, usize),

    #[cfg_attr(
        feature = "std",
        error("Range {start}..{end} is invalid for length {len}")
    )]
    InvalidRange { start: usize, end: usize, len: usize },

    #[cfg_attr(
        feature = "std",
        error("Word count mismatch: expected {expected}, found {found}")
    )]
    WordCountMismatch { expected: usize, found: usize },

    #[cfg_attr(feature = "std", error("bits beyond length {size} are not zero"))]
    TailNotClear { size: usize },

    #[cfg_attr(feature = "std", error("Size mismatch: {left} vs {right}"))]
    SizeMismatch { left: usize, right: usize },

    #[cfg_attr(
        feature = "std",
        error("Cannot take {0} bits from a word of {1} bits")
    )]
    TooManyBits(usize, usize),

    #[cfg_attr(
        feature = "std",
        error("Both dimensions must be greater than 0, got {width}x{height}")
    )]
    InvalidDimensions { width: usize, height: usize },

    #[cfg_attr(feature = "std", error("input matrix dimensions do not match"))]
    DimensionMismatch,

    #[cfg_attr(feature = "std", error("The region must fit inside the matrix"))]
    RegionOutOfBounds,
}

impl BitsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BitsError::IndexOutOfBounds(..) | BitsError::InvalidRange { .. } => ErrorKind::Index,
            BitsError::WordCountMismatch { .. }
            | BitsError::TailNotClear { .. }
            | BitsError::SizeMismatch { .. } => ErrorKind::ContractViolation,
            BitsError::TooManyBits(..)
            | BitsError::InvalidDimensions { .. }
            | BitsError::DimensionMismatch
            | BitsError::RegionOutOfBounds => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitsError::IndexOutOfBounds(i, l) => {
                write!(f, "Index {} is out of bounds for length {}", i, l)
            }
            BitsError::InvalidRange { start, end, len } => {
                write!(f, "Range {}..{} is invalid for length {}", start, end, len)
            }
            BitsError::WordCountMismatch { expected, found } => {
                write!(f, "Word count mismatch: expected {}, found {}", expected, found)
            }
            BitsError::TailNotClear { size } => {
                write!(f, "bits beyond length {} are not zero", size)
            }
            BitsError::SizeMismatch { left, right } => {
                write!(f, "Size mismatch: {} vs {}", left, right)
            }
            BitsError::TooManyBits(n, max) => {
                write!(f, "Cannot take {} bits from a word of {} bits", n, max)
            }
            BitsError::InvalidDimensions { width, height } => write!(
                f,
                "Both dimensions must be greater than 0, got {}x{}",
                width, height
            ),
            BitsError::DimensionMismatch => write!(f, "input matrix dimensions do not match"),
            BitsError::RegionOutOfBounds => write!(f, "The region must fit inside the matrix"),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::error::Error for BitsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(BitsError::IndexOutOfBounds(3, 2).kind(), ErrorKind::Index);
        assert_eq!(
            BitsError::InvalidRange { start: 4, end: 2, len: 8 }.kind(),
            ErrorKind::Index
        );
        assert_eq!(
            BitsError::WordCountMismatch { expected: 2, found: 3 }.kind(),
            ErrorKind::ContractViolation
        );
        assert_eq!(BitsError::TooManyBits(65, 64).kind(), ErrorKind::InvalidArgument);
    }

    #[cfg(feature = "std")]
    #[test]
    fn messages_name_the_offending_values() {
        let msg = BitsError::IndexOutOfBounds(17, 17).to_string();
        assert_eq!(msg, "Index 17 is out of bounds for length 17");
        let msg = BitsError::WordCountMismatch { expected: 2, found: 1 }.to_string();
        assert!(msg.contains("expected 2"));
    }
}

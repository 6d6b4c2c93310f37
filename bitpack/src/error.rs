//! Error types for symbol packing operations.

use std::fmt;

/// Result type for symbol packing operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur while building an alphabet or strictly decoding a token.
///
/// Encoding never fails, and lenient decoding skips foreign characters
/// instead of returning [`BitError::UnknownSymbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// The alphabet table does not contain exactly 64 symbols.
    InvalidAlphabetLength {
        /// Number of symbols provided.
        len: usize,
        /// Number of symbols required.
        expected: usize,
    },

    /// The same symbol appears twice in an alphabet table.
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// A symbol is not printable ASCII.
    InvalidSymbol {
        /// The rejected symbol.
        symbol: char,
    },

    /// A token character is not part of the alphabet (strict decoding only).
    UnknownSymbol {
        /// The unknown character.
        symbol: char,
        /// Character position within the token.
        position: usize,
    },
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlphabetLength { len, expected } => {
                write!(
                    f,
                    "alphabet has {len} symbols but exactly {expected} are required"
                )
            }
            Self::DuplicateSymbol { symbol } => {
                write!(f, "duplicate alphabet symbol {symbol:?}")
            }
            Self::InvalidSymbol { symbol } => {
                write!(f, "alphabet symbol {symbol:?} is not printable ascii")
            }
            Self::UnknownSymbol { symbol, position } => {
                write!(f, "unknown symbol {symbol:?} at position {position}")
            }
        }
    }
}

impl std::error::Error for BitError {}

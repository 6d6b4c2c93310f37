//! Symbol tables for 6-bit packing.

use std::fmt;

use crate::error::{BitError, BitResult};

/// Number of symbols in every alphabet (one per 6-bit value).
pub const ALPHABET_SIZE: usize = 64;

const ABSENT: u8 = 0xFF;

/// An ordered table of 64 distinct printable ASCII symbols.
///
/// The position of a symbol in the table is the 6-bit value it represents.
/// Reverse lookup is a direct table index, so decoding is O(1) per character.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; ALPHABET_SIZE],
    lookup: [u8; 128],
}

impl Alphabet {
    /// `A-Z a-z 0-9 - _`: every symbol is unreserved in URLs.
    pub const URL_SAFE: Self =
        Self::from_table(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_");

    /// `A-Z a-z 0-9 + /`: the RFC 4648 base64 table, without `=` padding.
    pub const STANDARD: Self =
        Self::from_table(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/");

    /// Builds an alphabet from a custom symbol table.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidAlphabetLength`] unless there are exactly 64 symbols,
    /// [`BitError::InvalidSymbol`] for anything outside printable ASCII and
    /// [`BitError::DuplicateSymbol`] if a symbol repeats.
    pub fn new(symbols: &str) -> BitResult<Self> {
        let len = symbols.chars().count();
        if len != ALPHABET_SIZE {
            return Err(BitError::InvalidAlphabetLength {
                len,
                expected: ALPHABET_SIZE,
            });
        }

        let mut table = [0u8; ALPHABET_SIZE];
        let mut seen = [false; 128];
        for (slot, symbol) in table.iter_mut().zip(symbols.chars()) {
            if !symbol.is_ascii_graphic() {
                return Err(BitError::InvalidSymbol { symbol });
            }
            let byte = symbol as u8;
            if seen[usize::from(byte)] {
                return Err(BitError::DuplicateSymbol { symbol });
            }
            seen[usize::from(byte)] = true;
            *slot = byte;
        }
        Ok(Self::from_table(&table))
    }

    const fn from_table(table: &[u8; ALPHABET_SIZE]) -> Self {
        let mut lookup = [ABSENT; 128];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            lookup[table[i] as usize] = i as u8;
            i += 1;
        }
        Self {
            symbols: *table,
            lookup,
        }
    }

    /// Returns the symbol for a 6-bit value. Bits above the low six are ignored.
    #[must_use]
    pub const fn symbol(&self, value: u8) -> char {
        self.symbols[(value & 0x3F) as usize] as char
    }

    /// Returns the 6-bit value of `symbol`, or `None` if it is not in the table.
    #[must_use]
    pub fn index_of(&self, symbol: char) -> Option<u8> {
        let byte = u8::try_from(symbol).ok().filter(u8::is_ascii)?;
        match self.lookup[usize::from(byte)] {
            ABSENT => None,
            value => Some(value),
        }
    }

    /// Returns `true` if `symbol` belongs to the table.
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Iterates the symbols in value order.
    pub fn symbols(&self) -> impl DoubleEndedIterator<Item = char> + '_ {
        self.symbols.iter().map(|&byte| char::from(byte))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::URL_SAFE
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet(\"{self}\")")
    }
}

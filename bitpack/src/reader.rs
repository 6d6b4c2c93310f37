//! Symbol-to-byte reader.

use std::str::Chars;

use crate::alphabet::Alphabet;

/// Unpacks 6-bit symbols back into bytes.
///
/// The reader is an iterator over decoded bytes. Characters outside the
/// alphabet are skipped and counted, never reported as errors. Bits that do
/// not complete a full byte when the input runs out are tail padding and are
/// discarded.
#[derive(Debug, Clone)]
pub struct SymbolReader<'a> {
    alphabet: &'a Alphabet,
    input: Chars<'a>,
    acc: u16,
    bit_count: u8,
    symbols_read: usize,
    skipped: usize,
}

impl<'a> SymbolReader<'a> {
    /// Creates a reader over `token`.
    #[must_use]
    pub fn new(alphabet: &'a Alphabet, token: &'a str) -> Self {
        Self {
            alphabet,
            input: token.chars(),
            acc: 0,
            bit_count: 0,
            symbols_read: 0,
            skipped: 0,
        }
    }

    /// Returns the number of alphabet symbols consumed so far.
    #[must_use]
    pub const fn symbols_read(&self) -> usize {
        self.symbols_read
    }

    /// Returns the number of foreign characters skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of buffered bits that do not yet form a byte.
    ///
    /// Once the iterator is exhausted this is the tail padding width (0, 2 or 4
    /// for tokens produced by [`SymbolWriter`](crate::SymbolWriter)).
    #[must_use]
    pub const fn pending_bits(&self) -> u8 {
        self.bit_count
    }
}

impl Iterator for SymbolReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.bit_count < 8 {
            let symbol = self.input.next()?;
            let Some(value) = self.alphabet.index_of(symbol) else {
                self.skipped += 1;
                continue;
            };
            self.acc = (self.acc << 6) | u16::from(value);
            self.bit_count += 6;
            self.symbols_read += 1;
        }
        self.bit_count -= 8;
        let byte = ((self.acc >> self.bit_count) & 0xFF) as u8;
        self.acc &= (1 << self.bit_count) - 1;
        Some(byte)
    }
}

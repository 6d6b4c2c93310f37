//! Byte-to-symbol writer.

use crate::alphabet::Alphabet;
use crate::encoded_len;

/// Packs bytes MSB-first into 6-bit symbols.
///
/// Bytes are accumulated and every complete 6-bit group is emitted as one
/// symbol. Call [`finish`](Self::finish) to flush the final partial group.
#[derive(Debug)]
pub struct SymbolWriter<'a> {
    alphabet: &'a Alphabet,
    out: String,
    /// Bits not yet emitted, right-aligned.
    acc: u16,
    /// Number of valid bits in `acc` (0-5 between writes).
    bit_count: u8,
    bytes_written: usize,
}

impl<'a> SymbolWriter<'a> {
    /// Creates a writer emitting symbols from `alphabet`.
    #[must_use]
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            out: String::new(),
            acc: 0,
            bit_count: 0,
            bytes_written: 0,
        }
    }

    /// Creates a writer with room for the symbols of `bytes` input bytes.
    #[must_use]
    pub fn with_capacity(alphabet: &'a Alphabet, bytes: usize) -> Self {
        Self {
            out: String::with_capacity(encoded_len(bytes)),
            ..Self::new(alphabet)
        }
    }

    /// Returns the number of complete symbols emitted so far.
    #[must_use]
    pub fn symbols_written(&self) -> usize {
        self.out.len()
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Appends one byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.acc = (self.acc << 8) | u16::from(byte);
        self.bit_count += 8;
        while self.bit_count >= 6 {
            self.bit_count -= 6;
            self.push_value(self.acc >> self.bit_count);
        }
        self.acc &= (1 << self.bit_count) - 1;
        self.bytes_written += 1;
    }

    /// Appends a slice of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Finishes writing and returns the symbols.
    ///
    /// If 1-5 bits are pending they are padded with zeros on the right into one
    /// final symbol. No padding characters are added.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush_tail();
        self.out
    }

    /// Finishes writing and appends the symbols to `buf`.
    pub fn finish_into(mut self, buf: &mut String) {
        self.flush_tail();
        buf.push_str(&self.out);
    }

    fn flush_tail(&mut self) {
        if self.bit_count > 0 {
            self.push_value(self.acc << (6 - self.bit_count));
            self.acc = 0;
            self.bit_count = 0;
        }
    }

    fn push_value(&mut self, value: u16) {
        let value = (value & 0x3F) as u8;
        self.out.push(self.alphabet.symbol(value));
    }
}

//! 6-bit symbol packing for the qrwallet URL codec.
//!
//! This crate turns arbitrary bytes into a string of symbols drawn from a
//! 64-entry [`Alphabet`], and back. Bytes are packed MSB-first: every 6 bits
//! become one symbol, and a final partial group of 1-5 bits is zero-padded
//! into one more symbol. There are no padding characters, so `n` bytes always
//! produce exactly [`encoded_len(n)`](encoded_len) symbols.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Encoding never fails** - Every byte sequence, including the empty one, has a token.
//! - **Lenient decoding** - Characters outside the alphabet are skipped, not errors.
//! - **No domain knowledge** - This crate knows nothing about URLs, compression or history.
//!
//! # Example
//!
//! ```
//! use bitpack::{decode, encode, Alphabet};
//!
//! let token = encode(&Alphabet::URL_SAFE, b"hello");
//! assert_eq!(token, "aGVsbG8");
//!
//! let bytes = decode(&Alphabet::URL_SAFE, &token);
//! assert_eq!(bytes, b"hello");
//! ```

mod alphabet;
mod error;
mod reader;
mod writer;

pub use alphabet::{Alphabet, ALPHABET_SIZE};
pub use error::{BitError, BitResult};
pub use reader::SymbolReader;
pub use writer::SymbolWriter;

/// Number of bits carried by one symbol.
pub const SYMBOL_BITS: usize = 6;

/// Number of symbols produced for `bytes` input bytes: `ceil(8 * bytes / 6)`.
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(SYMBOL_BITS)
}

/// Number of whole bytes carried by `symbols` alphabet symbols.
#[must_use]
pub const fn decoded_len(symbols: usize) -> usize {
    symbols * SYMBOL_BITS / 8
}

/// Encodes `bytes` as a token over `alphabet`.
#[must_use]
pub fn encode(alphabet: &Alphabet, bytes: &[u8]) -> String {
    let mut writer = SymbolWriter::with_capacity(alphabet, bytes.len());
    writer.write_bytes(bytes);
    writer.finish()
}

/// Decodes a token over `alphabet`, skipping any character not in the alphabet.
#[must_use]
pub fn decode(alphabet: &Alphabet, token: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(decoded_len(token.len()));
    bytes.extend(SymbolReader::new(alphabet, token));
    bytes
}

/// Decodes a token, failing on the first character not in the alphabet.
///
/// # Errors
///
/// Returns [`BitError::UnknownSymbol`] with the character position of the
/// first foreign character.
pub fn decode_strict(alphabet: &Alphabet, token: &str) -> BitResult<Vec<u8>> {
    if let Some((position, symbol)) = token
        .chars()
        .enumerate()
        .find(|&(_, symbol)| !alphabet.contains(symbol))
    {
        return Err(BitError::UnknownSymbol { symbol, position });
    }
    Ok(decode(alphabet, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let token = encode(&Alphabet::URL_SAFE, &[]);
        assert!(token.is_empty());
        assert!(decode(&Alphabet::URL_SAFE, &token).is_empty());
    }

    #[test]
    fn encoded_len_covers_every_remainder() {
        let expected = [0, 2, 3, 4, 6, 7, 8, 10, 11, 12, 14];
        for (bytes, symbols) in expected.into_iter().enumerate() {
            assert_eq!(encoded_len(bytes), symbols, "for {bytes} bytes");
            let token = encode(&Alphabet::URL_SAFE, &vec![0xA5; bytes]);
            assert_eq!(token.len(), symbols, "token length for {bytes} bytes");
        }
    }

    #[test]
    fn decoded_len_inverts_encoded_len() {
        for bytes in 0..64 {
            assert_eq!(decoded_len(encoded_len(bytes)), bytes);
        }
    }

    #[test]
    fn roundtrip_lengths_one_to_ten() {
        for len in 1..=10u8 {
            let bytes: Vec<u8> = (0..len).map(|i| i.wrapping_mul(37) ^ 0xC3).collect();
            let token = encode(&Alphabet::URL_SAFE, &bytes);
            assert_eq!(decode(&Alphabet::URL_SAFE, &token), bytes, "len {len}");
        }
    }

    #[test]
    fn doctest_example() {
        let token = encode(&Alphabet::URL_SAFE, b"hello");
        assert_eq!(token, "aGVsbG8");
        assert_eq!(decode(&Alphabet::URL_SAFE, &token), b"hello");
    }

    #[test]
    fn injected_character_is_ignored() {
        let token = encode(&Alphabet::URL_SAFE, b"hello");
        let mut corrupted = token.clone();
        corrupted.insert(3, '*');
        assert_eq!(
            decode(&Alphabet::URL_SAFE, &corrupted),
            decode(&Alphabet::URL_SAFE, &token)
        );
    }

    #[test]
    fn strict_decode_reports_position() {
        assert_eq!(
            decode_strict(&Alphabet::URL_SAFE, "aGV*sbG8"),
            Err(BitError::UnknownSymbol {
                symbol: '*',
                position: 3
            })
        );
        assert_eq!(
            decode_strict(&Alphabet::URL_SAFE, "aGVsbG8").unwrap(),
            b"hello"
        );
    }
}

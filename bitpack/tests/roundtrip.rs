use bitpack::{decode, encode, Alphabet, SymbolReader, SymbolWriter};

#[test]
fn streaming_writer_matches_encode() {
    let payload = b"https://github.com/foo/bar";
    let mut writer = SymbolWriter::new(&Alphabet::URL_SAFE);
    for chunk in payload.chunks(5) {
        writer.write_bytes(chunk);
    }
    assert_eq!(writer.bytes_written(), payload.len());
    assert_eq!(writer.finish(), encode(&Alphabet::URL_SAFE, payload));
}

#[test]
fn reader_counts_match_token_shape() {
    let payload = [0u8, 1, 2, 3, 4, 5, 6];
    let token = encode(&Alphabet::URL_SAFE, &payload);
    let mut reader = SymbolReader::new(&Alphabet::URL_SAFE, &token);
    let bytes: Vec<u8> = reader.by_ref().collect();

    assert_eq!(bytes, payload);
    assert_eq!(reader.symbols_read(), token.len());
    assert_eq!(reader.skipped(), 0);
    // 7 bytes = 56 bits = 9 symbols + 2 bits, padded to 10 symbols (60 bits).
    assert_eq!(reader.pending_bits(), 4);
}

#[test]
fn every_byte_value_roundtrips() {
    let payload: Vec<u8> = (0..=255).collect();
    for alphabet in [Alphabet::URL_SAFE, Alphabet::STANDARD] {
        let token = encode(&alphabet, &payload);
        assert!(token.chars().all(|c| alphabet.contains(c)));
        assert_eq!(decode(&alphabet, &token), payload);
    }
}

#[test]
fn truncated_token_yields_prefix() {
    let payload = b"truncate me";
    let token = encode(&Alphabet::URL_SAFE, payload);
    let truncated = &token[..token.len() - 3];
    let bytes = decode(&Alphabet::URL_SAFE, truncated);
    assert!(payload.starts_with(&bytes));
    assert!(bytes.len() < payload.len());
}

#[test]
fn custom_alphabet_roundtrip() {
    let symbols: String = Alphabet::URL_SAFE.symbols().rev().collect();
    let alphabet = Alphabet::new(&symbols).unwrap();
    let token = encode(&alphabet, b"custom");
    assert_ne!(token, encode(&Alphabet::URL_SAFE, b"custom"));
    assert_eq!(decode(&alphabet, &token), b"custom");
}

use compress::{compress, decompress, inflate, CompressError, CompressionLevel, Limits};
use proptest::prelude::*;

fn level_strategy() -> impl Strategy<Value = CompressionLevel> {
    prop_oneof![
        Just(CompressionLevel::Fast),
        Just(CompressionLevel::Default),
        Just(CompressionLevel::Best),
        (1u8..=9).prop_map(CompressionLevel::Precise),
    ]
}

proptest! {
    #[test]
    fn prop_text_roundtrip(text in any::<String>(), level in level_strategy()) {
        let bytes = compress(&text, level).unwrap();
        prop_assert_eq!(decompress(&bytes, &Limits::default()).unwrap(), text);
    }

    #[test]
    fn prop_json_like_roundtrip(entries in prop::collection::vec("[ -~\\n\"\\\\あ-ん]{0,40}", 0..16)) {
        let text = entries.join("\u{1F4F7}");
        let bytes = compress(&text, CompressionLevel::Default).unwrap();
        prop_assert_eq!(decompress(&bytes, &Limits::default()).unwrap(), text);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = inflate(&bytes, &Limits::for_testing());
    }

    #[test]
    fn prop_every_strict_prefix_fails(text in "[a-z ]{1,200}") {
        let bytes = compress(&text, CompressionLevel::Default).unwrap();
        for cut in 0..bytes.len() {
            let result = decompress(&bytes[..cut], &Limits::default());
            prop_assert!(result.is_err(), "prefix of {} bytes decoded", cut);
        }
    }
}

#[test]
fn truncation_is_reported_as_error_not_partial_text() {
    let text = "[\"hello\",\"https://github.com/foo/bar\"]";
    let bytes = compress(text, CompressionLevel::Default).unwrap();
    let err = decompress(&bytes[..bytes.len() - 1], &Limits::default()).unwrap_err();
    assert!(
        matches!(err, CompressError::Truncated { .. } | CompressError::Corrupt { .. }),
        "unexpected error {err:?}"
    );
}

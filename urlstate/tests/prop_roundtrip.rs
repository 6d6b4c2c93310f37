use history::{EntrySchema, HistoryEntry};
use proptest::prelude::*;
use url::Url;
use urlstate::{UrlStateManager, WalletConfig};

fn payload() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "https://[a-z]{1,12}\\.[a-z]{2,3}/[a-zA-Z0-9/_-]{0,24}",
        "[\"\\\\\\n {}\\[\\]]{0,8}",
    ]
}

fn manager(schema: EntrySchema, versioned: bool) -> UrlStateManager {
    let config = WalletConfig {
        schema,
        versioned,
        ..WalletConfig::default()
    };
    UrlStateManager::new(&config).unwrap()
}

proptest! {
    #[test]
    fn prop_list_roundtrip_through_token(
        data in prop::collection::vec(payload(), 0..12),
        versioned in any::<bool>(),
    ) {
        let manager = manager(EntrySchema::Plain, versioned);
        let entries: Vec<HistoryEntry> = data.into_iter().map(HistoryEntry::plain).collect();
        let token = manager.save_to_token(&entries).unwrap();
        prop_assert_eq!(manager.load_from_token(&token), entries);
    }

    #[test]
    fn prop_timestamped_roundtrip_through_url(
        data in prop::collection::vec((payload(), "[0-9]{4}/[0-9]{1,2}/[0-9]{1,2} [0-9:]{7,8}"), 1..8),
    ) {
        let manager = manager(EntrySchema::Timestamped, true);
        let entries: Vec<HistoryEntry> = data
            .into_iter()
            .map(|(data, stamp)| HistoryEntry::stamped(data, stamp))
            .collect();

        let mut url = Url::parse("https://wallet.example/").unwrap();
        manager.save(&mut url, &entries).unwrap();
        let reparsed = Url::parse(url.as_str()).unwrap();
        prop_assert_eq!(manager.load(&reparsed), entries);
    }

    #[test]
    fn prop_token_uses_only_query_safe_characters(data in prop::collection::vec(payload(), 1..6)) {
        let manager = manager(EntrySchema::Plain, true);
        let entries: Vec<HistoryEntry> = data.into_iter().map(HistoryEntry::plain).collect();
        let token = manager.save_to_token(&entries).unwrap();
        prop_assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '~'));
    }

    #[test]
    fn prop_arbitrary_query_never_panics(query in any::<String>()) {
        let manager = manager(EntrySchema::Plain, true);
        let _ = manager.load_from_token(&query);
        let _ = manager.codec().inspect(&query);
    }
}

use bitpack::Alphabet;
use compress::{CompressError, CompressionLevel};
use history::{EntrySchema, HistoryEntry};
use url::Url;
use urlstate::{
    InsertPosition, Location, StateError, TokenVersion, UrlStateManager, Wallet, WalletConfig,
};

const BASE: &str = "https://wallet.example/qr/";

fn manager() -> UrlStateManager {
    UrlStateManager::new(&WalletConfig::default()).unwrap()
}

fn plain(items: &[&str]) -> Vec<HistoryEntry> {
    items.iter().copied().map(HistoryEntry::plain).collect()
}

fn legacy_token(entries: &[HistoryEntry], schema: EntrySchema) -> String {
    let json = history::serialize(entries, schema).unwrap();
    let bytes = compress::compress(&json, CompressionLevel::Default).unwrap();
    bitpack::encode(&Alphabet::URL_SAFE, &bytes)
}

#[test]
fn hello_and_github_survive_a_fresh_session() {
    let entries = plain(&["hello", "https://github.com/foo/bar"]);

    let mut url = Url::parse(BASE).unwrap();
    manager().save(&mut url, &entries).unwrap();
    let token = url.query().unwrap().to_string();

    let fresh = Url::parse(&format!("{BASE}?{token}")).unwrap();
    let loaded = UrlStateManager::new(&WalletConfig::default())
        .unwrap()
        .load(&fresh);
    assert_eq!(loaded, entries);
}

#[test]
fn token_survives_url_reparse() {
    let entries = plain(&["a b", "\"quoted\"", "back\\slash", "new\nline", "ünïcødé ✓"]);
    let mut url = Url::parse(BASE).unwrap();
    manager().save(&mut url, &entries).unwrap();

    let reparsed = Url::parse(url.as_str()).unwrap();
    assert_eq!(reparsed.query(), url.query());
    assert_eq!(manager().load(&reparsed), entries);
}

#[test]
fn empty_list_is_bare_path() {
    let mut url = Url::parse(&format!("{BASE}?leftover")).unwrap();
    manager().save(&mut url, &[]).unwrap();
    assert_eq!(url.as_str(), BASE);
    assert!(!url.as_str().contains('?'));
}

#[test]
fn save_is_deterministic_and_idempotent() {
    let manager = manager();
    let entries = plain(&["one", "two", "two", "three"]);

    let mut first = Url::parse(BASE).unwrap();
    manager.save(&mut first, &entries).unwrap();

    let loaded = manager.load(&first);
    assert_eq!(loaded, entries);

    let mut second = Url::parse(BASE).unwrap();
    manager.save(&mut second, &loaded).unwrap();
    assert_eq!(first.as_str(), second.as_str());
}

#[test]
fn injected_foreign_character_is_ignored() {
    let manager = manager();
    let entries = plain(&["hello", "world"]);
    let token = manager.save_to_token(&entries).unwrap();

    for position in [0, 2, token.len() / 2, token.len()] {
        for foreign in ['*', '.', '!', '%', ' '] {
            let mut noisy = token.clone();
            noisy.insert(position, foreign);
            assert_eq!(
                manager.load_from_token(&noisy),
                entries,
                "{foreign:?} at {position}"
            );
        }
    }
}

#[test]
fn injected_marker_before_unversioned_token_is_ignored() {
    let manager = manager();
    let entries = plain(&["hello", "https://github.com/foo/bar"]);
    let token = legacy_token(&entries, EntrySchema::Plain);

    for noisy in [
        format!("~{token}"),
        format!("*~{token}"),
        format!("~~{token}"),
        format!("~{}~{}", &token[..2], &token[2..]),
    ] {
        assert_eq!(manager.load_from_token(&noisy), entries, "{noisy}");
    }

    let url = Url::parse(&format!("{BASE}?~{token}")).unwrap();
    assert_eq!(manager.load(&url), entries);
}

#[test]
fn truncated_token_loads_empty() {
    let manager = manager();
    let token = manager
        .save_to_token(&plain(&["hello", "https://github.com/foo/bar"]))
        .unwrap();
    let truncated = &token[..token.len() / 2];

    let err = manager.codec().decode_token(truncated).unwrap_err();
    assert!(matches!(
        err,
        StateError::Decompression(CompressError::Truncated { .. })
    ));

    let url = Url::parse(&format!("{BASE}?{truncated}")).unwrap();
    assert!(manager.load(&url).is_empty());
}

#[test]
fn corrupted_token_loads_empty() {
    let manager = manager();
    let token = manager.save_to_token(&plain(&["hello"])).unwrap();
    let corrupted = format!("{}{}", &token[..2], "A".repeat(token.len() - 2));

    assert!(matches!(
        manager.codec().decode_token(&corrupted),
        Err(StateError::Decompression(_))
    ));
    assert!(manager.load_from_token(&corrupted).is_empty());
}

#[test]
fn trailing_symbols_load_empty() {
    let manager = manager();
    let token = manager.save_to_token(&plain(&["hello"])).unwrap();
    let padded = format!("{token}AAAA");
    assert!(matches!(
        manager.codec().decode_token(&padded),
        Err(StateError::Decompression(CompressError::TrailingData { .. }))
    ));
    assert!(manager.load_from_token(&padded).is_empty());
}

#[test]
fn foreign_url_loads_empty() {
    for query in ["utm_source=news&utm_medium=email", "~", "~Z", "%7E%7E", "__"] {
        let url = Url::parse(&format!("{BASE}?{query}")).unwrap();
        assert!(manager().load(&url).is_empty(), "query {query:?}");
    }
}

#[test]
fn legacy_plain_token_loads() {
    let entries = plain(&["hello", "https://github.com/foo/bar"]);
    let token = legacy_token(&entries, EntrySchema::Plain);
    assert!(!token.starts_with('~'));

    let decoded = manager().codec().inspect(&token).unwrap();
    assert_eq!(decoded.report.version, TokenVersion::Legacy);
    assert_eq!(decoded.entries, entries);
}

#[test]
fn legacy_timestamped_token_loads() {
    let entries = vec![
        HistoryEntry::stamped("hello", "2024/12/31 23:59:59"),
        HistoryEntry::stamped("world", "2025/1/1 0:00:01"),
    ];
    let token = legacy_token(&entries, EntrySchema::Timestamped);
    assert_eq!(manager().load_from_token(&token), entries);
}

#[test]
fn unversioned_writer_matches_legacy_format() {
    let config = WalletConfig {
        versioned: false,
        ..WalletConfig::default()
    };
    let manager = UrlStateManager::new(&config).unwrap();
    let entries = plain(&["abc", "def"]);
    assert_eq!(
        manager.save_to_token(&entries).unwrap(),
        legacy_token(&entries, EntrySchema::Plain)
    );
}

#[test]
fn wallet_session_lifecycle() {
    let config = WalletConfig {
        schema: EntrySchema::Timestamped,
        insert: InsertPosition::Front,
        ..WalletConfig::default()
    };

    let mut wallet = Wallet::open(&config, Url::parse(BASE).unwrap()).unwrap();
    assert!(wallet.is_empty());
    wallet.append("first").unwrap();
    wallet.append("second").unwrap();
    wallet.append("third").unwrap();
    wallet.remove(1).unwrap();
    let href = wallet.share().unwrap();
    let expected = wallet.entries().to_vec();

    let reopened = Wallet::open(&config, Url::parse(&href).unwrap()).unwrap();
    assert_eq!(reopened.entries(), expected.as_slice());
    let data: Vec<&str> = reopened.entries().iter().map(|e| e.data.as_str()).collect();
    assert_eq!(data, ["third", "first"]);
    assert!(reopened.entries().iter().all(|e| e.timestamp.is_some()));

    let mut reopened = reopened;
    reopened.clear().unwrap();
    assert_eq!(reopened.into_location().as_str(), BASE);
}

#[test]
fn wallet_over_borrowed_location() {
    let mut url = Url::parse(BASE).unwrap();
    {
        let mut wallet = Wallet::new(&WalletConfig::default(), &mut url).unwrap();
        wallet.append("kept").unwrap();
    }
    assert!(Location::query(&url).is_some());
    assert_eq!(manager().load(&url), plain(&["kept"]));
}

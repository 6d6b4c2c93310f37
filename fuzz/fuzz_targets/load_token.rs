#![no_main]

use libfuzzer_sys::fuzz_target;
use urlstate::{UrlStateManager, WalletConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(manager) = UrlStateManager::new(&WalletConfig::for_testing()) else {
        return;
    };

    let entries = manager.load_from_token(token);
    if entries.is_empty() {
        return;
    }

    // Anything that loads must save and load back to the same payloads.
    // Legacy tokens may carry timestamps that the plain schema drops.
    if let Ok(saved) = manager.save_to_token(&entries) {
        let reloaded = manager.load_from_token(&saved);
        let data = |list: &[history::HistoryEntry]| -> Vec<String> {
            list.iter().map(|entry| entry.data.clone()).collect()
        };
        assert_eq!(data(&reloaded), data(&entries));
    }
});

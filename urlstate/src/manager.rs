//! Query-string persistence of a history list.

use history::HistoryEntry;
use tracing::{debug, warn};

use crate::config::WalletConfig;
use crate::error::StateResult;
use crate::location::Location;
use crate::token::TokenCodec;

/// Saves history into a [`Location`]'s query string and loads it back.
///
/// The manager holds no history. Every save recomputes the whole query string
/// from the list it is given.
#[derive(Debug, Clone)]
pub struct UrlStateManager {
    codec: TokenCodec,
}

impl UrlStateManager {
    /// Creates a manager for a config.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WalletConfig::validate`].
    pub fn new(config: &WalletConfig) -> StateResult<Self> {
        config.validate()?;
        Ok(Self {
            codec: TokenCodec::new(config)?,
        })
    }

    #[must_use]
    pub const fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Writes `entries` into the query string of `location`.
    ///
    /// An empty list clears the query string. On error the location is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn save<L: Location + ?Sized>(
        &self,
        location: &mut L,
        entries: &[HistoryEntry],
    ) -> StateResult<()> {
        let token = self.save_to_token(entries)?;
        if token.is_empty() {
            location.clear_query();
        } else {
            location.replace_query(Some(&token));
        }
        debug!(
            entries = entries.len(),
            token_len = token.len(),
            "saved history to location"
        );
        Ok(())
    }

    /// Reads history from the query string of `location`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn try_load<L: Location + ?Sized>(&self, location: &L) -> StateResult<Vec<HistoryEntry>> {
        match location.query() {
            None | Some("") => Ok(Vec::new()),
            Some(query) => self.codec.decode_token(query),
        }
    }

    /// Reads history from the query string of `location`.
    ///
    /// Any failure yields an empty list; a foreign or damaged URL starts a
    /// fresh wallet.
    #[must_use]
    pub fn load<L: Location + ?Sized>(&self, location: &L) -> Vec<HistoryEntry> {
        match self.try_load(location) {
            Ok(entries) => {
                debug!(entries = entries.len(), "loaded history from location");
                entries
            }
            Err(error) => {
                warn!(%error, href = %location.href(), "discarding unreadable history");
                Vec::new()
            }
        }
    }

    /// Encodes `entries` as a bare token. An empty list is the empty token.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn save_to_token(&self, entries: &[HistoryEntry]) -> StateResult<String> {
        self.codec.encode_token(entries)
    }

    /// Decodes a bare token, yielding an empty list on any failure.
    #[must_use]
    pub fn load_from_token(&self, token: &str) -> Vec<HistoryEntry> {
        self.codec.decode_token(token).unwrap_or_else(|error| {
            warn!(%error, token_len = token.len(), "discarding unreadable token");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use url::Url;

    fn manager() -> UrlStateManager {
        UrlStateManager::new(&WalletConfig::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://wallet.example/").unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = WalletConfig::default();
        config.qr.size = 0;
        assert!(matches!(
            UrlStateManager::new(&config),
            Err(StateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let manager = manager();
        let mut url = base();
        let entries = vec![HistoryEntry::plain("a"), HistoryEntry::plain("b")];
        manager.save(&mut url, &entries).unwrap();
        assert!(url.query().is_some());
        assert_eq!(manager.load(&url), entries);
    }

    #[test]
    fn empty_save_clears_query() {
        let manager = manager();
        let mut url = Url::parse("https://wallet.example/?stale").unwrap();
        manager.save(&mut url, &[]).unwrap();
        assert_eq!(url.as_str(), "https://wallet.example/");
    }

    #[test]
    fn load_without_query_is_empty() {
        assert!(manager().try_load(&base()).unwrap().is_empty());
        let url = Url::parse("https://wallet.example/?").unwrap();
        assert!(manager().try_load(&url).unwrap().is_empty());
    }

    #[test]
    fn load_garbage_is_empty() {
        let url = Url::parse("https://wallet.example/?not-a-wallet").unwrap();
        assert!(manager().try_load(&url).is_err());
        assert!(manager().load(&url).is_empty());
    }

    #[test]
    fn failed_save_leaves_location() {
        let mut config = WalletConfig::default();
        config.limits.max_entries = 1;
        let manager = UrlStateManager::new(&config).unwrap();
        let mut url = Url::parse("https://wallet.example/?before").unwrap();
        let entries = vec![HistoryEntry::plain("a"), HistoryEntry::plain("b")];
        assert!(manager.save(&mut url, &entries).is_err());
        assert_eq!(url.as_str(), "https://wallet.example/?before");
    }

    #[test]
    fn token_helpers() {
        let manager = manager();
        let entries = vec![HistoryEntry::plain("x")];
        let token = manager.save_to_token(&entries).unwrap();
        assert_eq!(manager.load_from_token(&token), entries);
        assert!(manager.load_from_token("@@@").is_empty());
        assert_eq!(manager.save_to_token(&[]).unwrap(), "");
    }
}

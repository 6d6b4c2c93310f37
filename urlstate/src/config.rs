//! Wallet configuration.

use bitpack::Alphabet;
use compress::{CompressionLevel, Limits};
use history::EntrySchema;
use serde::Deserialize;

use crate::error::{StateError, StateResult};
use crate::qr::QrOptions;
use crate::token::VERSION_MARKER;

/// Punctuation that survives a query string unescaped.
const QUERY_SAFE_PUNCTUATION: &str = "-._!$()*,;:@/=";

/// Which symbol table tokens are written with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetChoice {
    /// `A-Z a-z 0-9 - _`.
    #[default]
    UrlSafe,
    /// A custom 64-symbol table.
    Custom(String),
}

/// Where [`Wallet::append`](crate::Wallet::append) puts new entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    /// Insertion order.
    #[default]
    Back,
    /// Most recent first.
    Front,
}

/// Size limits for tokens read from and written to the URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StateLimits {
    /// Maximum token length in bytes, version marker included.
    pub max_token_len: usize,
    /// Maximum number of entries a wallet holds.
    pub max_entries: usize,
    /// Maximum size of the packed DEFLATE payload.
    pub max_compressed_bytes: usize,
    /// Maximum size of the inflated JSON text.
    pub max_inflated_bytes: usize,
}

impl Default for StateLimits {
    fn default() -> Self {
        let inflate = Limits::default();
        Self {
            // Common browser and server URL ceilings sit around 8 KB to 64 KB.
            max_token_len: 32 * 1024,
            max_entries: 1024,
            max_compressed_bytes: inflate.max_compressed_bytes,
            max_inflated_bytes: inflate.max_inflated_bytes,
        }
    }
}

impl StateLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        let inflate = Limits::for_testing();
        Self {
            max_token_len: 2048,
            max_entries: 16,
            max_compressed_bytes: inflate.max_compressed_bytes,
            max_inflated_bytes: inflate.max_inflated_bytes,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_token_len: usize::MAX,
            max_entries: usize::MAX,
            max_compressed_bytes: usize::MAX,
            max_inflated_bytes: usize::MAX,
        }
    }

    /// Returns the subset of limits enforced by the decompressor.
    #[must_use]
    pub const fn inflate_limits(&self) -> Limits {
        Limits {
            max_compressed_bytes: self.max_compressed_bytes,
            max_inflated_bytes: self.max_inflated_bytes,
        }
    }
}

/// Everything that fixes the byte-level shape of a token and the wallet's
/// behaviour around it.
///
/// Two wallets only read each other's URLs when `alphabet` matches and,
/// for unversioned tokens, when `schema` matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Symbol table for token payloads.
    pub alphabet: AlphabetChoice,
    /// Entry shape written on save.
    pub schema: EntrySchema,
    /// DEFLATE level used on save.
    pub level: CompressionLevel,
    /// Write the `~` version marker ahead of the payload.
    pub versioned: bool,
    /// Where new entries go.
    pub insert: InsertPosition,
    /// QR rendering options.
    pub qr: QrOptions,
    /// Token and wallet size limits.
    pub limits: StateLimits,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetChoice::UrlSafe,
            schema: EntrySchema::Plain,
            level: CompressionLevel::Default,
            versioned: true,
            insert: InsertPosition::Back,
            qr: QrOptions::default(),
            limits: StateLimits::default(),
        }
    }
}

impl WalletConfig {
    /// Creates a config with [`StateLimits::for_testing`].
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            limits: StateLimits::for_testing(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidConfig`] for malformed JSON and any error
    /// from [`validate`](Self::validate).
    pub fn from_json(text: &str) -> StateResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| StateError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the alphabet, QR options and limits.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Bitpack`] for a malformed custom alphabet,
    /// [`StateError::UnsafeSymbol`] for a symbol that does not survive a query
    /// string and [`StateError::InvalidConfig`] for bad QR options or zero limits.
    pub fn validate(&self) -> StateResult<()> {
        self.alphabet()?;
        self.qr
            .validate()
            .map_err(|e| StateError::InvalidConfig {
                message: e.to_string(),
            })?;
        if self.limits.max_token_len == 0 || self.limits.max_inflated_bytes == 0 {
            return Err(StateError::InvalidConfig {
                message: "token and inflate limits must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the configured alphabet.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn alphabet(&self) -> StateResult<Alphabet> {
        match &self.alphabet {
            AlphabetChoice::UrlSafe => Ok(Alphabet::URL_SAFE),
            AlphabetChoice::Custom(symbols) => {
                let alphabet = Alphabet::new(symbols)?;
                if let Some(symbol) = alphabet.symbols().find(|&s| !is_query_safe(s)) {
                    return Err(StateError::UnsafeSymbol { symbol });
                }
                Ok(alphabet)
            }
        }
    }
}

fn is_query_safe(symbol: char) -> bool {
    symbol != VERSION_MARKER
        && (symbol.is_ascii_alphanumeric() || QUERY_SAFE_PUNCTUATION.contains(symbol))
}

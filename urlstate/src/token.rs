//! Token framing and the save/load pipeline.
//!
//! A token is the whole query string. It is either versioned:
//!
//! ```text
//! ~ <schema symbol> <packed payload>
//! ```
//!
//! where the schema symbol is the alphabet symbol whose 6-bit value is the
//! [`EntrySchema`] tag, or legacy: the packed payload alone. The payload is
//! the raw DEFLATE stream of the serialized history, packed 6 bits per symbol.

use std::fmt;

use bitpack::{Alphabet, SymbolReader};
use compress::CompressionLevel;
use history::{EntrySchema, HistoryEntry};
use serde::Serialize;

use crate::config::{StateLimits, WalletConfig};
use crate::error::{LimitKind, StateError, StateResult};

/// Marks a versioned token. Never an alphabet symbol.
pub const VERSION_MARKER: char = '~';

/// How a token declares its entry schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenVersion {
    /// No marker; the payload may hold either entry shape.
    #[default]
    Legacy,
    /// Marker plus schema tag.
    Tagged(EntrySchema),
}

impl fmt::Display for TokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Tagged(schema) => write!(f, "v{} ({schema})", schema.tag()),
        }
    }
}

/// A token split into its version and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenFrame<'a> {
    /// Declared schema, or legacy when there is no marker.
    pub version: TokenVersion,
    /// Packed symbols after the marker and schema symbol.
    pub payload: &'a str,
}

impl<'a> TokenFrame<'a> {
    /// Splits `token` at the version marker.
    ///
    /// Characters that are neither alphabet symbols nor the marker are
    /// skipped before the marker and between the marker and the schema
    /// symbol, the same way payload decoding skips them.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingVersion`] if the marker is not followed by
    /// a symbol and [`StateError::UnsupportedVersion`] for an unknown tag.
    pub fn parse(alphabet: &Alphabet, token: &'a str) -> StateResult<Self> {
        let head =
            token.trim_start_matches(|c: char| c != VERSION_MARKER && !alphabet.contains(c));
        let Some(rest) = head.strip_prefix(VERSION_MARKER) else {
            return Ok(Self {
                version: TokenVersion::Legacy,
                payload: token,
            });
        };

        let rest = rest.trim_start_matches(|c: char| !alphabet.contains(c));
        let mut chars = rest.chars();
        let tag = chars
            .next()
            .and_then(|symbol| alphabet.index_of(symbol))
            .ok_or(StateError::MissingVersion)?;
        let schema =
            EntrySchema::from_tag(tag).ok_or(StateError::UnsupportedVersion { found: tag })?;
        Ok(Self {
            version: TokenVersion::Tagged(schema),
            payload: chars.as_str(),
        })
    }
}

/// Sizes observed at each stage of decoding a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    /// Version the token was decoded as.
    pub version: TokenVersion,
    /// Token length in bytes.
    pub token_len: usize,
    /// Payload symbols consumed.
    pub symbols: usize,
    /// Foreign characters skipped in the payload.
    pub skipped: usize,
    /// Bytes unpacked from the payload symbols.
    pub compressed_bytes: usize,
    /// Bytes of JSON text after inflation.
    pub inflated_bytes: usize,
    /// Number of decoded entries.
    pub entries: usize,
}

/// A decoded history list with its [`TokenReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// Entries in token order.
    pub entries: Vec<HistoryEntry>,
    /// Stage sizes.
    pub report: TokenReport,
}

/// Converts history lists to tokens and back for one configuration.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    alphabet: Alphabet,
    schema: EntrySchema,
    level: CompressionLevel,
    versioned: bool,
    limits: StateLimits,
}

impl TokenCodec {
    /// Creates a codec from a validated config.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WalletConfig::alphabet`].
    pub fn new(config: &WalletConfig) -> StateResult<Self> {
        Ok(Self {
            alphabet: config.alphabet()?,
            schema: config.schema,
            level: config.level,
            versioned: config.versioned,
            limits: config.limits.clone(),
        })
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub const fn schema(&self) -> EntrySchema {
        self.schema
    }

    #[must_use]
    pub const fn limits(&self) -> &StateLimits {
        &self.limits
    }

    /// Encodes `entries` as a token. An empty list is the empty token.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::LimitsExceeded`] if the list or the token is over
    /// its limit, or a wrapped serializer or compressor error.
    pub fn encode_token(&self, entries: &[HistoryEntry]) -> StateResult<String> {
        if entries.is_empty() {
            return Ok(String::new());
        }
        check_limit(LimitKind::Entries, self.limits.max_entries, entries.len())?;

        let text = history::serialize(entries, self.schema)?;
        let inflate = self.limits.inflate_limits();
        if text.len() > inflate.max_inflated_bytes {
            return Err(compress::CompressError::LimitsExceeded {
                kind: compress::LimitKind::InflatedBytes,
                limit: inflate.max_inflated_bytes,
                actual: text.len(),
            }
            .into());
        }
        let bytes = compress::compress(&text, self.level)?;
        if bytes.len() > inflate.max_compressed_bytes {
            return Err(compress::CompressError::LimitsExceeded {
                kind: compress::LimitKind::CompressedBytes,
                limit: inflate.max_compressed_bytes,
                actual: bytes.len(),
            }
            .into());
        }

        let mut token = String::with_capacity(bitpack::encoded_len(bytes.len()) + 2);
        if self.versioned {
            token.push(VERSION_MARKER);
            token.push(self.alphabet.symbol(self.schema.tag()));
        }
        let mut writer = bitpack::SymbolWriter::with_capacity(&self.alphabet, bytes.len());
        writer.write_bytes(&bytes);
        writer.finish_into(&mut token);

        check_limit(LimitKind::TokenLength, self.limits.max_token_len, token.len())?;
        Ok(token)
    }

    /// Decodes a token. A leading `?` is ignored; the empty token is the empty list.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn decode_token(&self, token: &str) -> StateResult<Vec<HistoryEntry>> {
        self.inspect(token).map(|decoded| decoded.entries)
    }

    /// Decodes a token and reports the size of every stage.
    ///
    /// A token whose version marker cannot be honoured, because the schema
    /// symbol is missing or unknown or the tagged payload does not decode, is
    /// retried whole as a legacy token. A stray `~` in front of an unversioned
    /// token is then skipped like any other foreign character.
    ///
    /// # Errors
    ///
    /// See [`decode_token`](Self::decode_token). When the legacy retry also
    /// fails, the error of the versioned attempt is returned.
    pub fn inspect(&self, token: &str) -> StateResult<DecodedToken> {
        let token = token.strip_prefix('?').unwrap_or(token);
        if token.is_empty() {
            return Ok(DecodedToken {
                entries: Vec::new(),
                report: TokenReport::default(),
            });
        }
        check_limit(LimitKind::TokenLength, self.limits.max_token_len, token.len())?;

        let legacy = TokenFrame {
            version: TokenVersion::Legacy,
            payload: token,
        };
        let err = match TokenFrame::parse(&self.alphabet, token) {
            Ok(frame) if frame.version == TokenVersion::Legacy => {
                return self.decode_frame(token, frame);
            }
            Ok(frame) => match self.decode_frame(token, frame) {
                Ok(decoded) => return Ok(decoded),
                Err(err) => err,
            },
            Err(err) => err,
        };
        self.decode_frame(token, legacy).map_err(|_| err)
    }

    fn decode_frame(&self, token: &str, frame: TokenFrame<'_>) -> StateResult<DecodedToken> {
        let mut report = TokenReport {
            version: frame.version,
            token_len: token.len(),
            ..TokenReport::default()
        };

        let mut reader = SymbolReader::new(&self.alphabet, frame.payload);
        let bytes: Vec<u8> = reader.by_ref().collect();
        report.symbols = reader.symbols_read();
        report.skipped = reader.skipped();
        report.compressed_bytes = bytes.len();

        let text = compress::decompress(&bytes, &self.limits.inflate_limits())?;
        report.inflated_bytes = text.len();

        let entries = match frame.version {
            TokenVersion::Legacy => history::deserialize_untagged(&text)?,
            TokenVersion::Tagged(schema) => history::deserialize(&text, schema)?,
        };
        check_limit(LimitKind::Entries, self.limits.max_entries, entries.len())?;
        report.entries = entries.len();

        Ok(DecodedToken { entries, report })
    }
}

fn check_limit(kind: LimitKind, limit: usize, actual: usize) -> StateResult<()> {
    if actual > limit {
        return Err(StateError::LimitsExceeded {
            kind,
            limit,
            actual,
        });
    }
    Ok(())
}

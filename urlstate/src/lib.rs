//! URL query-string persistence for the qrwallet history.
//!
//! This crate joins the lower layers into one pipeline:
//!
//! ```text
//! history list -> JSON text -> raw DEFLATE bytes -> 6-bit symbols -> query string
//! ```
//!
//! and its exact inverse. The whole query string is the token; there is no
//! `key=value` structure. An empty list is the bare path with no `?`.
//!
//! # Design Principles
//!
//! - **Load never fails** - Any unreadable query string degrades to an empty wallet.
//! - **Save is all or nothing** - A failed save leaves the location as it was.
//! - **Full recompute** - Every save rewrites the token from the in-memory list.
//! - **Versioned tokens** - The entry schema travels with the token.
//!
//! # Example
//!
//! ```
//! use history::HistoryEntry;
//! use url::Url;
//! use urlstate::{UrlStateManager, WalletConfig};
//!
//! let manager = UrlStateManager::new(&WalletConfig::default()).unwrap();
//! let mut url = Url::parse("https://wallet.example/").unwrap();
//!
//! let entries = vec![HistoryEntry::plain("hello")];
//! manager.save(&mut url, &entries).unwrap();
//! assert_eq!(manager.load(&url), entries);
//! ```

mod config;
mod error;
mod location;
mod manager;
pub mod qr;
mod session;
mod token;

pub use config::{AlphabetChoice, InsertPosition, StateLimits, WalletConfig};
pub use error::{CaptureError, LimitKind, QrError, StateError, StateResult};
pub use location::Location;
pub use manager::UrlStateManager;
pub use session::{AppendOutcome, Wallet};
pub use token::{
    DecodedToken, TokenCodec, TokenFrame, TokenReport, TokenVersion, VERSION_MARKER,
};

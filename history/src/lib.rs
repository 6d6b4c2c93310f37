//! History entry model and JSON serialization for qrwallet.
//!
//! A wallet is an ordered list of [`HistoryEntry`] values. This crate turns
//! that list into deterministic JSON text and back, in one of two shapes
//! selected by [`EntrySchema`]:
//!
//! - [`EntrySchema::Plain`]: `["payload", ...]`
//! - [`EntrySchema::Timestamped`]: `[{"data": "payload", "timestamp": "..."}, ...]`
//!
//! # Design Principles
//!
//! - **Order is data** - Entries round-trip in exactly the order given, duplicates included.
//! - **Schema-checked parsing** - A document in the wrong shape is an error, not missing fields.
//! - **No domain knowledge** - This crate knows nothing about compression or URLs.

mod entry;
mod error;
mod schema;
mod serializer;

pub use entry::{display_timestamp, HistoryEntry, TIMESTAMP_FORMAT};
pub use error::{HistoryError, HistoryResult, ParseCategory};
pub use schema::EntrySchema;
pub use serializer::{deserialize, deserialize_untagged, serialize};

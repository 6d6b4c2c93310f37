//! JSON encoding of history lists.

use serde::{Deserialize, Serialize};

use crate::entry::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};
use crate::schema::EntrySchema;

#[derive(Serialize)]
struct RecordRef<'a> {
    data: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
}

#[derive(Deserialize)]
struct Record {
    data: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyEntry {
    Plain(String),
    Record(Record),
}

impl From<Record> for HistoryEntry {
    fn from(record: Record) -> Self {
        Self {
            data: record.data,
            timestamp: record.timestamp,
        }
    }
}

impl From<AnyEntry> for HistoryEntry {
    fn from(entry: AnyEntry) -> Self {
        match entry {
            AnyEntry::Plain(data) => Self::plain(data),
            AnyEntry::Record(record) => record.into(),
        }
    }
}

/// Serializes `entries` as a JSON array in the shape of `schema`.
///
/// Order is preserved and the output is deterministic. Under
/// [`EntrySchema::Plain`] timestamps are not written.
pub fn serialize(entries: &[HistoryEntry], schema: EntrySchema) -> HistoryResult<String> {
    let result = match schema {
        EntrySchema::Plain => {
            let items: Vec<&str> = entries.iter().map(|entry| entry.data.as_str()).collect();
            serde_json::to_string(&items)
        }
        EntrySchema::Timestamped => {
            let items: Vec<RecordRef<'_>> = entries
                .iter()
                .map(|entry| RecordRef {
                    data: &entry.data,
                    timestamp: entry.timestamp.as_deref(),
                })
                .collect();
            serde_json::to_string(&items)
        }
    };
    result.map_err(|err| HistoryError::serialize(&err))
}

/// Parses a JSON array that must have the shape of `schema`.
pub fn deserialize(text: &str, schema: EntrySchema) -> HistoryResult<Vec<HistoryEntry>> {
    let entries = match schema {
        EntrySchema::Plain => serde_json::from_str::<Vec<String>>(text)
            .map(|items| items.into_iter().map(HistoryEntry::plain).collect()),
        EntrySchema::Timestamped => serde_json::from_str::<Vec<Record>>(text)
            .map(|items| items.into_iter().map(HistoryEntry::from).collect()),
    };
    entries.map_err(|err| HistoryError::parse(&err))
}

/// Parses a JSON array whose elements may be strings or records.
///
/// Used for payloads that do not say which schema wrote them.
pub fn deserialize_untagged(text: &str) -> HistoryResult<Vec<HistoryEntry>> {
    serde_json::from_str::<Vec<AnyEntry>>(text)
        .map(|items| items.into_iter().map(HistoryEntry::from).collect())
        .map_err(|err| HistoryError::parse(&err))
}

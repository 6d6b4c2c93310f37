//! History entries.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};

/// Display format of entry timestamps (`2025/1/5 9:03:07`).
pub const TIMESTAMP_FORMAT: &str = "%Y/%-m/%-d %-H:%M:%S";

/// One stored QR payload.
///
/// The timestamp is a display string recorded when the entry was added. It
/// is never parsed or sorted on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    /// The QR payload text.
    pub data: String,
    /// Display timestamp, when the schema records one.
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    /// Creates an entry without a timestamp.
    #[must_use]
    pub fn plain(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            timestamp: None,
        }
    }

    /// Creates an entry with an explicit display timestamp.
    #[must_use]
    pub fn stamped(data: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Creates an entry stamped with the current local time.
    #[must_use]
    pub fn stamped_now(data: impl Into<String>) -> Self {
        Self::stamped(data, display_timestamp(&Local::now()))
    }
}

impl From<&str> for HistoryEntry {
    fn from(data: &str) -> Self {
        Self::plain(data)
    }
}

impl From<String> for HistoryEntry {
    fn from(data: String) -> Self {
        Self::plain(data)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.timestamp {
            Some(timestamp) => write!(f, "[{timestamp}] {}", self.data),
            None => write!(f, "{}", self.data),
        }
    }
}

/// Formats `time` with [`TIMESTAMP_FORMAT`].
pub fn display_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

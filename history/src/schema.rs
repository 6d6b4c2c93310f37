//! Entry schema variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The JSON shape of a serialized history list.
///
/// Only one schema is active per deployment. Each has a stable tag so a
/// token can record which shape its payload uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySchema {
    /// `["payload", ...]`
    #[default]
    Plain,
    /// `[{"data": "payload", "timestamp": "2025/1/5 9:03:07"}, ...]`
    Timestamped,
}

impl EntrySchema {
    /// All schemas, in tag order.
    pub const ALL: [Self; 2] = [Self::Plain, Self::Timestamped];

    /// Returns the stable tag for this schema.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Plain => 1,
            Self::Timestamped => 2,
        }
    }

    /// Looks up a schema by tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Plain),
            2 => Some(Self::Timestamped),
            _ => None,
        }
    }

    /// Returns `true` if entries created under this schema carry a timestamp.
    #[must_use]
    pub const fn is_timestamped(self) -> bool {
        matches!(self, Self::Timestamped)
    }
}

impl fmt::Display for EntrySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Timestamped => "timestamped",
        };
        write!(f, "{name}")
    }
}

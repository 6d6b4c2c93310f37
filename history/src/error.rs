//! Error types for history serialization.

use std::fmt;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while converting history to or from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The text is not a history document.
    Parse {
        category: ParseCategory,
        line: usize,
        column: usize,
        message: String,
    },

    /// The entries could not be written as JSON.
    Serialize { message: String },
}

/// Why a history document failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseCategory {
    /// Malformed JSON.
    Syntax,
    /// Valid JSON with the wrong shape for the entry schema.
    Shape,
    /// The text ended in the middle of a value.
    Eof,
}

impl HistoryError {
    pub(crate) fn parse(err: &serde_json::Error) -> Self {
        let category = match err.classify() {
            serde_json::error::Category::Eof => ParseCategory::Eof,
            serde_json::error::Category::Data => ParseCategory::Shape,
            serde_json::error::Category::Syntax | serde_json::error::Category::Io => {
                ParseCategory::Syntax
            }
        };
        Self::Parse {
            category,
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    pub(crate) fn serialize(err: &serde_json::Error) -> Self {
        Self::Serialize {
            message: err.to_string(),
        }
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                category, message, ..
            } => write!(f, "history {category} error: {message}"),
            Self::Serialize { message } => write!(f, "history serialization failed: {message}"),
        }
    }
}

impl fmt::Display for ParseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "syntax",
            Self::Shape => "shape",
            Self::Eof => "eof",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for HistoryError {}

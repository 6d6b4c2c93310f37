//! Error types for compression operations.

use std::fmt;

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;

/// Errors that can occur while compressing or decompressing a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompressError {
    /// The compressor reported a failure.
    Deflate { message: String },

    /// The input is not a valid raw DEFLATE stream.
    Corrupt {
        /// Input offset at which inflation failed.
        offset: usize,
        message: String,
    },

    /// The input ended before the final DEFLATE block.
    Truncated {
        /// Bytes consumed before the input ran out.
        consumed: usize,
    },

    /// Bytes follow the end of the DEFLATE stream.
    TrailingData {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// The inflated bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific compression limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    CompressedBytes,
    InflatedBytes,
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deflate { message } => write!(f, "deflate failed: {message}"),
            Self::Corrupt { offset, message } => {
                write!(f, "corrupt deflate stream at byte {offset}: {message}")
            }
            Self::Truncated { consumed } => {
                write!(
                    f,
                    "truncated deflate stream: input ended after {consumed} bytes"
                )
            }
            Self::TrailingData { remaining } => {
                write!(f, "{remaining} trailing bytes after end of deflate stream")
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(
                    f,
                    "inflated payload is not utf-8 (valid up to byte {valid_up_to})"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CompressedBytes => "compressed bytes",
            Self::InflatedBytes => "inflated bytes",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CompressError {}

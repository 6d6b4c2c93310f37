//! Error types for URL state operations.

use std::fmt;

use bitpack::BitError;
use compress::CompressError;
use history::HistoryError;

/// Result type for URL state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while saving or loading history through the URL.
///
/// [`UrlStateManager::load`](crate::UrlStateManager::load) maps every one of
/// these to an empty history; they only surface through `try_load` and `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Alphabet table error.
    Bitpack(BitError),

    /// The token payload is not a usable DEFLATE stream.
    Decompression(CompressError),

    /// The inflated payload is not a history document.
    Parse(HistoryError),

    /// A version marker without a schema symbol after it.
    MissingVersion,

    /// The token was written with a schema this build does not know.
    UnsupportedVersion {
        /// 6-bit value of the schema symbol.
        found: u8,
    },

    /// A configured alphabet symbol cannot travel in a query string.
    UnsafeSymbol {
        /// The offending symbol.
        symbol: char,
    },

    /// The configuration document is invalid.
    InvalidConfig {
        /// What was wrong.
        message: String,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific state limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    TokenLength,
    Entries,
}

/// Errors raised by the QR collaborator contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// A color is not `#RRGGBB`.
    InvalidColor {
        /// The rejected text.
        value: String,
    },

    /// The rendered symbol size is zero.
    InvalidSize {
        /// The rejected size in pixels.
        size: u32,
    },

    /// The quiet-zone margin leaves no room for the symbol.
    InvalidMargin {
        /// Margin in pixels.
        margin: u32,
        /// Image size in pixels.
        size: u32,
    },

    /// An error correction level other than L, M, Q or H.
    InvalidErrorLevel {
        /// The rejected text.
        value: String,
    },

    /// A pixel buffer does not match its dimensions.
    FrameSize {
        /// Bytes needed for the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// Camera or clipboard access failures.
///
/// These are reported to the user as status messages and never stop the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user or the platform denied access.
    PermissionDenied,

    /// The platform has no camera or clipboard API.
    Unsupported,

    /// The device exists but could not be opened.
    DeviceUnavailable {
        /// Platform error text.
        message: String,
    },
}

impl CaptureError {
    /// Returns the status line shown to the user.
    #[must_use]
    pub const fn status_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Camera access was denied. Check the browser's site permissions."
            }
            Self::Unsupported => "This browser does not support camera capture.",
            Self::DeviceUnavailable { .. } => "The camera could not be started.",
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitpack(e) => write!(f, "alphabet error: {e}"),
            Self::Decompression(e) => write!(f, "decompression error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::MissingVersion => write!(f, "version marker without schema symbol"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported token version: {found}")
            }
            Self::UnsafeSymbol { symbol } => {
                write!(f, "alphabet symbol {symbol:?} is not safe in a query string")
            }
            Self::InvalidConfig { message } => write!(f, "invalid config: {message}"),
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
            Self::TokenLength => "token length",
            Self::Entries => "entries",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { value } => write!(f, "invalid color {value:?}, expected #RRGGBB"),
            Self::InvalidSize { size } => write!(f, "invalid qr size {size}"),
            Self::InvalidMargin { margin, size } => {
                write!(f, "margin {margin} leaves no room in a {size}px symbol")
            }
            Self::InvalidErrorLevel { value } => {
                write!(f, "invalid error correction level {value:?}, expected L, M, Q or H")
            }
            Self::FrameSize { expected, actual } => {
                write!(f, "frame has {actual} bytes, dimensions need {expected}")
            }
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "capture permission denied"),
            Self::Unsupported => write!(f, "capture unsupported"),
            Self::DeviceUnavailable { message } => {
                write!(f, "capture device unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitpack(e) => Some(e),
            Self::Decompression(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for QrError {}

impl std::error::Error for CaptureError {}

impl From<BitError> for StateError {
    fn from(err: BitError) -> Self {
        Self::Bitpack(err)
    }
}

impl From<CompressError> for StateError {
    fn from(err: CompressError) -> Self {
        Self::Decompression(err)
    }
}

impl From<HistoryError> for StateError {
    fn from(err: HistoryError) -> Self {
        Self::Parse(err)
    }
}

//! Compression level selection.

use flate2::Compression;

/// DEFLATE compression level.
///
/// The level only affects the size of the output; any level inflates with the
/// same decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompressionLevel {
    /// Level 1.
    Fast,
    /// Level 6, the zlib default that browser `CompressionStream` uses.
    #[default]
    Default,
    /// Level 9.
    Best,
    /// An explicit level, clamped to 1-9.
    Precise(u8),
}

impl CompressionLevel {
    /// Returns the numeric zlib level.
    #[must_use]
    pub fn level(self) -> u32 {
        match self {
            Self::Fast => 1,
            Self::Default => 6,
            Self::Best => 9,
            Self::Precise(n) => u32::from(n.clamp(1, 9)),
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        Self::new(level.level())
    }
}

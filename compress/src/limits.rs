//! Configurable limits for bounded inflation.

/// Size limits enforced while decompressing.
///
/// Tokens arrive from untrusted URLs, so inflation stops as soon as the
/// output crosses `max_inflated_bytes` instead of expanding a hostile stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of the compressed input in bytes.
    pub max_compressed_bytes: usize,

    /// Maximum size of the inflated output in bytes.
    pub max_inflated_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Browsers stop accepting URLs long before 64 KB of payload.
            max_compressed_bytes: 64 * 1024,
            max_inflated_bytes: 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_compressed_bytes: 4096,
            max_inflated_bytes: 16 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_compressed_bytes: usize::MAX,
            max_inflated_bytes: usize::MAX,
        }
    }
}

//! Raw DEFLATE adapter for the qrwallet URL codec.
//!
//! History text is compressed with raw DEFLATE (no zlib/gzip container, no
//! length prefix, no checksum) before it is packed into URL symbols. Because
//! the stream carries no header, both sides must agree on the algorithm a
//! priori; any conforming raw DEFLATE decoder can read what this crate writes.
//!
//! # Design Principles
//!
//! - **Bounded inflation** - Input and output sizes are checked against [`Limits`].
//! - **Exact streams** - Truncated input and trailing bytes are errors, not silent data loss.
//! - **No domain knowledge** - This crate compresses text; it knows nothing about JSON or URLs.
//!
//! # Example
//!
//! ```
//! use compress::{compress, decompress, CompressionLevel, Limits};
//!
//! let bytes = compress("[\"hello\"]", CompressionLevel::Default).unwrap();
//! let text = decompress(&bytes, &Limits::default()).unwrap();
//! assert_eq!(text, "[\"hello\"]");
//! ```

mod deflate;
mod error;
mod level;
mod limits;

pub use deflate::{compress, decompress, inflate};
pub use error::{CompressError, CompressResult, LimitKind};
pub use level::CompressionLevel;
pub use limits::Limits;

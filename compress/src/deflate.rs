//! Raw DEFLATE compression and bounded inflation.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{CompressError, CompressResult, LimitKind};
use crate::level::CompressionLevel;
use crate::limits::Limits;

const CHUNK_SIZE: usize = 8 * 1024;

/// Compresses UTF-8 text into a raw DEFLATE stream.
///
/// The output has no zlib or gzip header, no length prefix and no checksum.
pub fn compress(text: &str, level: CompressionLevel) -> CompressResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(text.len() / 2 + 16), level.into());
    encoder
        .write_all(text.as_bytes())
        .map_err(|err| CompressError::Deflate {
            message: err.to_string(),
        })?;
    encoder.finish().map_err(|err| CompressError::Deflate {
        message: err.to_string(),
    })
}

/// Inflates a raw DEFLATE stream and decodes it as UTF-8 text.
pub fn decompress(bytes: &[u8], limits: &Limits) -> CompressResult<String> {
    let inflated = inflate(bytes, limits)?;
    String::from_utf8(inflated).map_err(|err| CompressError::InvalidUtf8 {
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

/// Inflates a raw DEFLATE stream.
///
/// The whole input must be exactly one stream: input that ends before the
/// final block is [`CompressError::Truncated`] and bytes after it are
/// [`CompressError::TrailingData`].
pub fn inflate(bytes: &[u8], limits: &Limits) -> CompressResult<Vec<u8>> {
    if bytes.len() > limits.max_compressed_bytes {
        return Err(CompressError::LimitsExceeded {
            kind: LimitKind::CompressedBytes,
            limit: limits.max_compressed_bytes,
            actual: bytes.len(),
        });
    }

    // false = raw deflate (-15 window)
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(3).min(CHUNK_SIZE));
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let consumed = inflater.total_in() as usize;
        let before_out = inflater.total_out();
        let status = inflater
            .decompress(&bytes[consumed..], &mut chunk, FlushDecompress::None)
            .map_err(|err| CompressError::Corrupt {
                offset: consumed,
                message: err.to_string(),
            })?;
        let produced = (inflater.total_out() - before_out) as usize;

        let actual = out.len() + produced;
        if actual > limits.max_inflated_bytes {
            return Err(CompressError::LimitsExceeded {
                kind: LimitKind::InflatedBytes,
                limit: limits.max_inflated_bytes,
                actual,
            });
        }
        out.extend_from_slice(&chunk[..produced]);

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // No progress with free output space means the input ran out.
                if produced == 0 && inflater.total_in() as usize == consumed {
                    return Err(CompressError::Truncated { consumed });
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed < bytes.len() {
        return Err(CompressError::TrailingData {
            remaining: bytes.len() - consumed,
        });
    }
    Ok(out)
}

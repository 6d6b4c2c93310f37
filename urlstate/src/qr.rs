//! QR collaborator contracts.
//!
//! Camera capture, pixel decoding and symbol rendering live outside this
//! workspace. This module fixes the narrow interfaces a host implements for
//! them, plus the rendering options record and the scan de-duplication that
//! sits between the decoder and the wallet.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::QrError;

/// Polling cadence for live camera frames.
pub const SCAN_INTERVAL: Duration = Duration::from_millis(100);

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorLevel {
    /// About 7% recovery.
    L,
    /// About 15% recovery.
    #[default]
    M,
    /// About 25% recovery.
    Q,
    /// About 30% recovery.
    H,
}

impl std::str::FromStr for ErrorLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" | "l" => Ok(Self::L),
            "M" | "m" => Ok(Self::M),
            "Q" | "q" => Ok(Self::Q),
            "H" | "h" => Ok(Self::H),
            _ => Err(QrError::InvalidErrorLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        write!(f, "{name}")
    }
}

/// An opaque sRGB color written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (hex digits in either case).
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidColor`] for anything else.
    pub fn parse(value: &str) -> Result<Self, QrError> {
        let invalid = || QrError::InvalidColor {
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Rendering options handed to a [`QrEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct QrOptions {
    /// Edge length of the rendered image in pixels.
    pub size: u32,
    /// Quiet zone around the symbol in pixels.
    pub margin: u32,
    /// Error correction level.
    pub error_level: ErrorLevel,
    /// Module color.
    pub dark_color: Color,
    /// Background color.
    pub light_color: Color,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 200,
            margin: 2,
            error_level: ErrorLevel::M,
            dark_color: Color::BLACK,
            light_color: Color::WHITE,
        }
    }
}

impl QrOptions {
    /// Checks that the options describe a drawable symbol.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidSize`] for a zero size and
    /// [`QrError::InvalidMargin`] when the margins cover the whole image.
    pub fn validate(&self) -> Result<(), QrError> {
        if self.size == 0 {
            return Err(QrError::InvalidSize { size: self.size });
        }
        if self.margin.saturating_mul(2) >= self.size {
            return Err(QrError::InvalidMargin {
                margin: self.margin,
                size: self.size,
            });
        }
        Ok(())
    }
}

/// A borrowed RGBA camera frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    /// Wraps an RGBA buffer of `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::FrameSize`] if the buffer length does not match.
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, QrError> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if pixels.len() != expected {
            return Err(QrError::FrameSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[must_use]
    pub const fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Pixel-to-payload QR detection.
pub trait QrDecoder {
    /// Returns the payload of a QR symbol found in `frame`, if any.
    fn decode(&mut self, frame: &Frame<'_>) -> Option<String>;
}

/// Payload-to-image QR rendering.
pub trait QrEncoder {
    type Image;
    type Error: std::error::Error;

    /// Renders `text` as a QR symbol.
    ///
    /// # Errors
    ///
    /// Implementation defined, typically a payload too large for the symbol.
    fn render(&self, text: &str, options: &QrOptions) -> Result<Self::Image, Self::Error>;
}

/// Suppresses repeated detections of the same payload.
///
/// A code held in front of the camera is detected on every poll. Only the
/// first detection of a payload is passed on until a different payload is
/// seen or the filter is reset.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    last: Option<String>,
}

impl ScanFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the payload if it differs from the previous accepted one.
    pub fn accept(&mut self, payload: String) -> Option<String> {
        if self.last.as_deref() == Some(payload.as_str()) {
            return None;
        }
        self.last = Some(payload.clone());
        Some(payload)
    }

    /// Runs `decoder` on `frame` and filters the result.
    pub fn poll<D: QrDecoder + ?Sized>(
        &mut self,
        decoder: &mut D,
        frame: &Frame<'_>,
    ) -> Option<String> {
        decoder.decode(frame).and_then(|payload| self.accept(payload))
    }

    /// Forgets the last payload, e.g. when scanning restarts.
    pub fn reset(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

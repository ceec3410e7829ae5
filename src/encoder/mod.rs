//! Text to QR code image.
//!
//! The symbol itself comes from the [`qrcode`] crate; this module picks the byte
//! representation of the text, asks for a symbol and rasterizes the resulting module
//! matrix onto a fixed size black-on-white canvas.

mod matrix;
mod render;

pub use matrix::BitMatrix;
pub use render::{render, Geometry, DARK, LIGHT};

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use qrcode::QrCode;
use serde::Deserialize;

use crate::config::EncoderConfig;
use crate::error::EncodeError;
use crate::raster::GeneratedImage;

pub const DEFAULT_SIZE: u32 = 400;
pub const DEFAULT_QUIET_ZONE: u32 = 4;
/// Largest canvas side in pixels.
pub const MAX_SIZE: u32 = 4096;
pub const MAX_QUIET_ZONE: u32 = 64;

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Deserialize)]
pub enum ECLevel {
    #[default]
    L,
    M,
    Q,
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

// Encoder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QrEncoder {
    size: u32,
    quiet_zone: u32,
    ec_level: ECLevel,
    charset: &'static Encoding,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrEncoder {
    pub fn new() -> Self {
        Self {
            size: DEFAULT_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE,
            ec_level: ECLevel::L,
            charset: UTF_8,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Result<Self, EncodeError> {
        let mut encoder = Self::new();
        encoder
            .size(config.size)
            .quiet_zone(config.quiet_zone)
            .ec_level(config.ec_level)
            .charset(&config.charset)?;
        Ok(encoder)
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = size;
        self
    }

    pub fn quiet_zone(&mut self, quiet_zone: u32) -> &mut Self {
        self.quiet_zone = quiet_zone;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Sets the character set by WHATWG label, e.g. `utf-8` or `shift_jis`.
    pub fn charset(&mut self, label: &str) -> Result<&mut Self, EncodeError> {
        let charset = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| EncodeError::UnknownCharset(label.to_string()))?;
        self.charset = charset.output_encoding();
        Ok(self)
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Size: {}, Quiet zone: {}, Ec level: {:?}, Charset: {} }}",
            self.size,
            self.quiet_zone,
            self.ec_level,
            self.charset.name()
        )
    }

    /// Encodes `text` into a square image of `size` pixels.
    pub fn encode(&self, text: &str) -> Result<GeneratedImage, EncodeError> {
        if text.is_empty() {
            return Err(EncodeError::EmptyData);
        }

        let payload = self.payload(text)?;
        let code = QrCode::with_error_correction_level(&payload, self.ec_level.into())?;
        let matrix = BitMatrix::from_code(&code);
        let raster = render(&matrix, self.quiet_zone, self.size, self.size)?;

        tracing::info!(
            bytes = payload.len(),
            modules = matrix.width(),
            width = raster.width(),
            height = raster.height(),
            "Generated QR {}",
            self.metadata()
        );
        Ok(GeneratedImage::new(raster, matrix, self.quiet_zone))
    }

    fn payload<'t>(&self, text: &'t str) -> Result<Cow<'t, [u8]>, EncodeError> {
        let (bytes, _, had_errors) = self.charset.encode(text);
        if had_errors {
            return Err(EncodeError::Unrepresentable { charset: self.charset.name() });
        }
        Ok(bytes)
    }
}

//! Still-image rendering and encoding.
//!
//! The render/encode step of the pipeline: scale a decoded frame from its
//! native size to the resolved output dimensions, then encode it to the
//! requested still-image format at the configured quality.

use std::io::Cursor;

use image::{
    RgbImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    imageops::{self, FilterType},
};

use crate::error::ExtractError;

/// Compressed still-image output format for extracted frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StillFormat {
    /// Lossless PNG. The quality parameter does not apply.
    #[default]
    Png,
    /// Lossy JPEG. Quality 0.01–1.0 maps to encoder quality 1–100.
    Jpeg,
}

impl StillFormat {
    /// The conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            StillFormat::Png => "png",
            StillFormat::Jpeg => "jpg",
        }
    }

    /// Parse a format from its user-facing string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "png" => Some(StillFormat::Png),
            "jpg" | "jpeg" => Some(StillFormat::Jpeg),
            _ => None,
        }
    }
}

/// Scale a decoded frame to the output dimensions.
///
/// Pass-through when the target equals the frame's current size; bilinear
/// resampling otherwise (matching the decoder driver's scaler flags).
pub fn render_to_size(frame: RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.width() == width && frame.height() == height {
        frame
    } else {
        imageops::resize(&frame, width, height, FilterType::Triangle)
    }
}

/// Encode a rendered frame to the target format.
///
/// # Errors
///
/// Returns [`ExtractError::ImageError`] when the encoder cannot produce a
/// buffer.
pub fn encode_frame(
    frame: &RgbImage,
    format: StillFormat,
    quality: f32,
) -> Result<Vec<u8>, ExtractError> {
    let mut bytes = Vec::new();

    match format {
        StillFormat::Png => {
            let encoder = PngEncoder::new(Cursor::new(&mut bytes));
            frame.write_with_encoder(encoder)?;
        }
        StillFormat::Jpeg => {
            let encoder_quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
            let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), encoder_quality);
            frame.write_with_encoder(encoder)?;
        }
    }

    Ok(bytes)
}

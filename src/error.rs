//! Error types for the `framepack` crate.
//!
//! This module defines [`ExtractError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context to
//! diagnose the problem without additional logging at the call site.

use std::{path::PathBuf, time::Duration};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framepack` operations.
///
/// Every public method that can fail returns `Result<T, ExtractError>`.
/// None of these errors are retried internally: an extraction run either
/// completes or fails as a whole, and no partial archive is produced on
/// failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The sampling mode string was neither `rate` nor `count`.
    #[error("Invalid sampling mode {0:?}: provide either \"rate\" or \"count\"")]
    InvalidSamplingMode(String),

    /// The sampling parameter falls outside the range allowed by its mode.
    #[error("Sampling parameter {value} is out of range for mode {mode} (allowed {min}..={max})")]
    SamplingParameterOutOfRange {
        /// Sampling mode the parameter was paired with.
        mode: &'static str,
        /// The rejected value.
        value: u32,
        /// Lowest allowed value.
        min: u32,
        /// Highest allowed value.
        max: u32,
    },

    /// The encode quality falls outside the valid range.
    #[error("Encode quality {0} is out of range (allowed 0.01..=1.0)")]
    QualityOutOfRange(f32),

    /// A dimension-policy parameter was rejected during request validation.
    #[error("Invalid dimension policy: {0}")]
    InvalidDimensionPolicy(String),

    /// The video source could not be opened.
    #[error("Failed to open video source at {path}: {reason}")]
    SourceOpen {
        /// Path that was passed to [`crate::DecoderHandle::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The source does not contain a video stream.
    #[error("No video stream found in source")]
    NoVideoStream,

    /// The decoder did not reach a playable state within the bound.
    ///
    /// Fatal for the whole extraction; a different source file is the only
    /// recovery.
    #[error("Decoder did not become playable within {0:?}")]
    PlayableTimeout(Duration),

    /// The decoder did not confirm a commanded seek within the bound.
    #[error("Decoder did not confirm seek within {0:?}")]
    SeekTimeout(Duration),

    /// The source could not be decoded or seeked.
    #[error("Failed to decode video: {0}")]
    DecodeFailure(String),

    /// The still-image encoder could not produce a buffer.
    #[error("Failed to encode frame: {0}")]
    EncodeFailure(String),

    /// An error from the `image` crate during frame encoding or resizing.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The archive packager could not produce the archive byte stream.
    #[error("Archive packaging error: {0}")]
    ArchiveError(String),
}

impl From<FfmpegError> for ExtractError {
    fn from(error: FfmpegError) -> Self {
        ExtractError::DecodeFailure(error.to_string())
    }
}

//! Extraction requests and run options.
//!
//! [`ExtractionRequest`] is the validated description of *what* to extract:
//! sampling mode and parameter, encode quality and format, and the output
//! dimension policy. Construction validates every field so the pipeline can
//! assume valid input throughout.
//!
//! [`ExtractOptions`] carries the *how*: progress callback and readiness
//! timeouts. It is a builder so operational settings do not pollute every
//! function signature.
//!
//! # Example
//!
//! ```
//! use framepack::{DimensionPolicy, ExtractionRequest, SamplingMode, StillFormat};
//!
//! let request = ExtractionRequest::new(
//!     SamplingMode::Count,
//!     12,
//!     1.0,
//!     StillFormat::Png,
//!     DimensionPolicy::Original,
//! )
//! .unwrap();
//! assert_eq!(request.param(), 12);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    dimensions::DimensionPolicy,
    encode::StillFormat,
    error::ExtractError,
    progress::{NoOpProgress, ProgressCallback},
};

/// Allowed sampling parameter range for [`SamplingMode::Rate`] (frames per
/// second of source time).
pub const RATE_RANGE: RangeInclusive<u32> = 1..=60;

/// Allowed sampling parameter range for [`SamplingMode::Count`] (total
/// frames spread over the duration).
pub const COUNT_RANGE: RangeInclusive<u32> = 1..=3600;

/// Allowed encode quality range.
pub const QUALITY_RANGE: RangeInclusive<f32> = 0.01..=1.0;

/// Default bound on waiting for the decoder to become playable.
pub const DEFAULT_PLAYABLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default bound on waiting for a commanded seek to complete.
pub const DEFAULT_SEEK_TIMEOUT: Duration = Duration::from_secs(10);

/// How capture timestamps are derived from the source duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Capture `param` frames per second of source time.
    Rate,
    /// Capture `param` frames spread evenly over the whole duration.
    Count,
}

impl SamplingMode {
    /// Parse a mode from its user-facing string form.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSamplingMode`] for anything other
    /// than `rate` or `count` (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, ExtractError> {
        match value.to_ascii_lowercase().as_str() {
            "rate" => Ok(SamplingMode::Rate),
            "count" => Ok(SamplingMode::Count),
            _ => Err(ExtractError::InvalidSamplingMode(value.to_string())),
        }
    }

    /// The user-facing name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            SamplingMode::Rate => "rate",
            SamplingMode::Count => "count",
        }
    }

    fn param_range(&self) -> RangeInclusive<u32> {
        match self {
            SamplingMode::Rate => RATE_RANGE,
            SamplingMode::Count => COUNT_RANGE,
        }
    }
}

/// A validated description of one extraction run.
///
/// Invariant: every field has been range-checked at construction, so the
/// extraction pipeline never re-validates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    mode: SamplingMode,
    param: u32,
    quality: f32,
    format: StillFormat,
    policy: DimensionPolicy,
}

impl ExtractionRequest {
    /// Build a request, validating every field.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::SamplingParameterOutOfRange`] when `param` is
    ///   outside [`RATE_RANGE`] / [`COUNT_RANGE`] for its mode.
    /// - [`ExtractError::QualityOutOfRange`] when `quality` is outside
    ///   [`QUALITY_RANGE`].
    /// - [`ExtractError::InvalidDimensionPolicy`] for bad policy
    ///   parameters.
    pub fn new(
        mode: SamplingMode,
        param: u32,
        quality: f32,
        format: StillFormat,
        policy: DimensionPolicy,
    ) -> Result<Self, ExtractError> {
        let range = mode.param_range();
        if !range.contains(&param) {
            return Err(ExtractError::SamplingParameterOutOfRange {
                mode: mode.name(),
                value: param,
                min: *range.start(),
                max: *range.end(),
            });
        }

        if !QUALITY_RANGE.contains(&quality) {
            return Err(ExtractError::QualityOutOfRange(quality));
        }

        policy.validate()?;

        Ok(Self {
            mode,
            param,
            quality,
            format,
            policy,
        })
    }

    /// The sampling mode.
    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// The sampling parameter (rate or count, depending on mode).
    pub fn param(&self) -> u32 {
        self.param
    }

    /// The encode quality (0.01–1.0). Ignored by PNG.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// The still-image output format.
    pub fn format(&self) -> StillFormat {
        self.format
    }

    /// The output dimension policy.
    pub fn policy(&self) -> DimensionPolicy {
        self.policy
    }
}

/// Operational settings for one extraction run.
///
/// All fields have defaults — a default-constructed options value runs
/// silently with the standard timeouts.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) playable_timeout: Duration,
    pub(crate) seek_timeout: Duration,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("playable_timeout", &self.playable_timeout)
            .field("seek_timeout", &self.seek_timeout)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings: no progress callback,
    /// [`DEFAULT_PLAYABLE_TIMEOUT`], [`DEFAULT_SEEK_TIMEOUT`].
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            playable_timeout: DEFAULT_PLAYABLE_TIMEOUT,
            seek_timeout: DEFAULT_SEEK_TIMEOUT,
        }
    }

    /// Attach a progress callback, invoked once per collected frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Bound how long the extractor waits for the decoder to become
    /// playable before failing with
    /// [`ExtractError::PlayableTimeout`].
    #[must_use]
    pub fn with_playable_timeout(mut self, timeout: Duration) -> Self {
        self.playable_timeout = timeout;
        self
    }

    /// Bound how long the extractor waits for each commanded seek before
    /// failing with [`ExtractError::SeekTimeout`].
    #[must_use]
    pub fn with_seek_timeout(mut self, timeout: Duration) -> Self {
        self.seek_timeout = timeout;
        self
    }
}

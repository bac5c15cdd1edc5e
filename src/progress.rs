//! Progress reporting.
//!
//! [`ProgressCallback`] lets callers observe an extraction run as it
//! advances. The extractor fires it once per collected frame, strictly in
//! timestamp order, with the integer percentage
//! `ceil(timestamp / duration * 100)`.
//!
//! That formula repeats 0% for early timestamps of long sources and only
//! reports a literal 100 when the final timestamp lands exactly on the
//! duration — callers wanting "100% = last frame" should key off
//! [`ProgressInfo::frames_collected`] against the expected total instead.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framepack::{ExtractOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{}% ({} frames)", info.percent, info.frames_collected);
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::time::Duration;

/// A snapshot of extraction progress, delivered once per collected frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressInfo {
    /// Integer completion percentage, `ceil(timestamp / duration * 100)`.
    pub percent: u8,
    /// Frames collected so far (equals the 1-based index of the frame
    /// that triggered this report).
    pub frames_collected: u64,
    /// The capture timestamp of the frame that triggered this report.
    pub timestamp: Duration,
}

/// Trait for receiving progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] so the same callback can
/// be shared with UI threads. Callbacks are infallible — they observe but
/// cannot halt the run.
pub trait ProgressCallback: Send + Sync {
    /// Called after each frame is collected.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Compute the reported percentage for a timestamp.
///
/// A zero (or unreported) duration pins the percentage at 100 rather than
/// propagating a NaN.
pub(crate) fn percent_at(timestamp: f64, duration: f64) -> u8 {
    if duration <= 0.0 {
        return 100;
    }
    let percent = (timestamp / duration * 100.0).ceil();
    percent.clamp(0.0, 100.0) as u8
}

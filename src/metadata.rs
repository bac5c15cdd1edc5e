//! Video source metadata.

use std::time::Duration;

/// Basic parameters of an opened video source.
///
/// Obtained once from the decoder driver after it signals playable
/// (see [`await_playable`](crate::readiness::await_playable)) and
/// immutable thereafter. Everything the scheduler and dimension
/// resolver need is here: the container duration and the native frame
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    /// Total duration of the source. Zero if the container does not
    /// report one.
    pub duration: Duration,
    /// Native frame width in pixels.
    pub width: u32,
    /// Native frame height in pixels.
    pub height: u32,
}

impl VideoMetadata {
    /// Duration in fractional seconds, the unit the timestamp scheduler
    /// works in.
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

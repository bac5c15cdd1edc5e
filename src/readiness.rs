//! Readiness synchronization with the decoder driver.
//!
//! The driver signals readiness states asynchronously; these waiters turn
//! them into blocking suspension points for the sequential pipeline. Both
//! waits are bounded: the playable wait has always been (default 3000 ms,
//! [`DEFAULT_PLAYABLE_TIMEOUT`](crate::config::DEFAULT_PLAYABLE_TIMEOUT)),
//! and the seek wait carries a mandatory timeout as well (default 10 s,
//! [`DEFAULT_SEEK_TIMEOUT`](crate::config::DEFAULT_SEEK_TIMEOUT)) so a
//! driver that never confirms a seek cannot hang the run.
//!
//! Each call consumes exactly one event from the handle. Neither timeout
//! is retried — readiness failures are fatal for the whole extraction.

use std::time::Duration;

use image::RgbImage;

use crate::{
    decoder::{DecoderEvent, DecoderHandle},
    error::ExtractError,
    metadata::VideoMetadata,
};

/// Block until the decoder signals it is playable, returning the source
/// metadata.
///
/// # Errors
///
/// - [`ExtractError::PlayableTimeout`] when no event arrives within
///   `timeout`.
/// - [`ExtractError::DecodeFailure`] when the driver reports an error,
///   exits, or answers with an out-of-protocol event.
pub fn await_playable(
    handle: &DecoderHandle,
    timeout: Duration,
) -> Result<VideoMetadata, ExtractError> {
    match handle.next_event(timeout) {
        Ok(DecoderEvent::Playable(metadata)) => Ok(metadata),
        Ok(DecoderEvent::Error(reason)) => Err(ExtractError::DecodeFailure(reason)),
        Ok(DecoderEvent::Seeked(_)) => Err(ExtractError::DecodeFailure(
            "decoder signalled a seek before becoming playable".to_string(),
        )),
        Err(Some(error)) => Err(error),
        Err(None) => Err(ExtractError::PlayableTimeout(timeout)),
    }
}

/// Block until the decoder confirms the last commanded seek, returning the
/// decoded frame at the seek target.
///
/// Callers must have commanded a seek first; the wait consumes the single
/// event that answers it.
///
/// # Errors
///
/// - [`ExtractError::SeekTimeout`] when no event arrives within `timeout`.
/// - [`ExtractError::DecodeFailure`] when the driver reports an error,
///   exits, or answers with an out-of-protocol event.
pub fn await_seeked(
    handle: &DecoderHandle,
    timeout: Duration,
) -> Result<RgbImage, ExtractError> {
    match handle.next_event(timeout) {
        Ok(DecoderEvent::Seeked(frame)) => Ok(frame),
        Ok(DecoderEvent::Error(reason)) => Err(ExtractError::DecodeFailure(reason)),
        Ok(DecoderEvent::Playable(_)) => Err(ExtractError::DecodeFailure(
            "decoder re-signalled playable while a seek was pending".to_string(),
        )),
        Err(Some(error)) => Err(error),
        Err(None) => Err(ExtractError::SeekTimeout(timeout)),
    }
}

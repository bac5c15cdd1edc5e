//! Decoder driver protocol.
//!
//! Decoding backends are inherently asynchronous: a driver owns the
//! demuxer/decoder resources on its own thread and the sequential
//! extraction pipeline talks to it over a channel-based handshake. Each
//! command produces exactly one event (one-shot, single-fire), which the
//! readiness waiters in [`crate::readiness`] consume with bounded
//! timeouts.
//!
//! [`DecoderHandle::open`] spawns the FFmpeg-backed driver from
//! [`crate::ffmpeg`]. [`DecoderHandle::from_channels`] admits any other
//! backend that speaks the same protocol — the deterministic scripted
//! drivers in this crate's tests are built that way.
//!
//! Ownership: the handle is exclusively owned by one extraction run.
//! Dropping it disconnects the command channel, which the driver thread
//! observes and uses to release its resources, on every exit path.

use std::{
    path::Path,
    sync::mpsc::{Receiver, RecvTimeoutError, Sender},
    time::Duration,
};

use image::RgbImage;

use crate::{error::ExtractError, metadata::VideoMetadata};

/// Commands the extraction pipeline sends to a decoder driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    /// Position the decoder at a timestamp (seconds) and decode the frame
    /// there. Answered by exactly one [`DecoderEvent::Seeked`] (or
    /// [`DecoderEvent::Error`]).
    Seek(f64),
}

/// Events a decoder driver sends back to the pipeline.
pub enum DecoderEvent {
    /// The source opened and enough data is available to decode. Carries
    /// the source metadata. Sent exactly once, before any `Seeked` event.
    Playable(VideoMetadata),
    /// A commanded seek completed. Carries the decoded frame at the seek
    /// target, in RGB at the source's native dimensions.
    Seeked(RgbImage),
    /// The driver hit an unrecoverable decode error and is shutting down.
    Error(String),
}

impl std::fmt::Debug for DecoderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecoderEvent::Playable(metadata) => {
                f.debug_tuple("Playable").field(metadata).finish()
            }
            DecoderEvent::Seeked(frame) => f
                .debug_struct("Seeked")
                .field("width", &frame.width())
                .field("height", &frame.height())
                .finish(),
            DecoderEvent::Error(reason) => f.debug_tuple("Error").field(reason).finish(),
        }
    }
}

/// The pipeline's end of the decoder handshake.
///
/// # Example
///
/// ```no_run
/// use framepack::DecoderHandle;
///
/// let handle = DecoderHandle::open("input.webm")?;
/// # Ok::<(), framepack::ExtractError>(())
/// ```
pub struct DecoderHandle {
    commands: Sender<DecoderCommand>,
    events: Receiver<DecoderEvent>,
}

impl DecoderHandle {
    /// Open a video source on a fresh FFmpeg driver thread.
    ///
    /// The driver opens the source, locates the best video stream, and
    /// signals [`DecoderEvent::Playable`] once decoding is possible.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceOpen`] if the source cannot be opened
    /// or [`ExtractError::NoVideoStream`] if it has no video stream. Both
    /// are detected before the driver thread starts; failures after that
    /// point arrive as [`DecoderEvent::Error`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        crate::ffmpeg::spawn_driver(path.as_ref())
    }

    /// Build a handle from raw protocol channels.
    ///
    /// For custom decoder backends: the backend holds the matching
    /// `Receiver<DecoderCommand>` / `Sender<DecoderEvent>` pair and must
    /// answer every command with exactly one event.
    pub fn from_channels(
        commands: Sender<DecoderCommand>,
        events: Receiver<DecoderEvent>,
    ) -> Self {
        Self { commands, events }
    }

    /// Command the driver to seek. The completion event is collected
    /// separately via [`await_seeked`](crate::readiness::await_seeked).
    pub(crate) fn seek(&self, timestamp: f64) -> Result<(), ExtractError> {
        self.commands
            .send(DecoderCommand::Seek(timestamp))
            .map_err(|_| ExtractError::DecodeFailure("decoder driver exited".to_string()))
    }

    /// Block for the next event, up to `timeout`.
    ///
    /// `Err(None)` means the timeout elapsed; the caller maps it to the
    /// readiness-specific timeout error.
    pub(crate) fn next_event(
        &self,
        timeout: Duration,
    ) -> Result<DecoderEvent, Option<ExtractError>> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => Err(None),
            Err(RecvTimeoutError::Disconnected) => Err(Some(ExtractError::DecodeFailure(
                "decoder driver exited unexpectedly".to_string(),
            ))),
        }
    }
}

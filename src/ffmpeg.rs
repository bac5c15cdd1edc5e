//! FFmpeg-backed decoder driver.
//!
//! [`spawn_driver`] opens a video source, locates its best video stream,
//! and moves the demuxer onto a dedicated thread that speaks the
//! [`DecoderCommand`](crate::DecoderCommand) /
//! [`DecoderEvent`](crate::DecoderEvent) protocol: it signals playable
//! once, then answers each seek command with the decoded frame nearest the
//! requested timestamp, scaled to RGB at the source's native dimensions.
//!
//! The thread owns the demuxer, decoder, and scaler exclusively for the
//! lifetime of one extraction run and releases them when the command
//! channel disconnects.

use std::{
    path::Path,
    sync::mpsc,
    thread,
    time::Duration,
};

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    util::log::Level,
};
use image::RgbImage;

use crate::{
    decoder::{DecoderCommand, DecoderEvent, DecoderHandle},
    error::ExtractError,
    metadata::VideoMetadata,
};

/// Tolerance when matching decoded frame timestamps against a seek target.
/// Half a frame at 1000 fps; generous enough for time-base rounding.
const SEEK_EPSILON_SECONDS: f64 = 0.0005;

/// Open `path` and spawn the driver thread.
///
/// # Errors
///
/// Returns [`ExtractError::SourceOpen`] if FFmpeg cannot initialise or the
/// source cannot be opened, and [`ExtractError::NoVideoStream`] if the
/// source has no video stream. Failures after the thread starts arrive as
/// [`DecoderEvent::Error`] events.
pub(crate) fn spawn_driver(path: &Path) -> Result<DecoderHandle, ExtractError> {
    let source_path = path.to_path_buf();

    log::debug!("Opening video source: {}", source_path.display());

    // Initialise ffmpeg (safe to call multiple times).
    ffmpeg_next::init().map_err(|error| ExtractError::SourceOpen {
        path: source_path.clone(),
        reason: format!("FFmpeg initialisation failed: {error}"),
    })?;

    let input = ffmpeg_next::format::input(&path).map_err(|error| ExtractError::SourceOpen {
        path: source_path.clone(),
        reason: error.to_string(),
    })?;

    let stream_index = input
        .streams()
        .best(Type::Video)
        .map(|stream| stream.index())
        .ok_or(ExtractError::NoVideoStream)?;

    let (command_tx, command_rx) = mpsc::channel::<DecoderCommand>();
    let (event_tx, event_rx) = mpsc::channel::<DecoderEvent>();

    thread::Builder::new()
        .name("framepack-decoder".to_string())
        .spawn(move || drive(input, stream_index, &command_rx, &event_tx))
        .map_err(|error| ExtractError::SourceOpen {
            path: source_path,
            reason: format!("Failed to spawn decoder thread: {error}"),
        })?;

    Ok(DecoderHandle::from_channels(command_tx, event_rx))
}

/// The driver loop: signal playable, then answer seek commands until the
/// pipeline drops its end of the command channel.
fn drive(
    mut input: Input,
    stream_index: usize,
    commands: &mpsc::Receiver<DecoderCommand>,
    events: &mpsc::Sender<DecoderEvent>,
) {
    let mut state = match DriverState::new(&input, stream_index) {
        Ok(state) => state,
        Err(error) => {
            let _ = events.send(DecoderEvent::Error(error.to_string()));
            return;
        }
    };

    if events
        .send(DecoderEvent::Playable(state.metadata.clone()))
        .is_err()
    {
        return;
    }

    while let Ok(command) = commands.recv() {
        let DecoderCommand::Seek(timestamp) = command;

        match state.decode_at(&mut input, timestamp) {
            Ok(frame) => {
                if events.send(DecoderEvent::Seeked(frame)).is_err() {
                    return;
                }
            }
            Err(error) => {
                let _ = events.send(DecoderEvent::Error(error.to_string()));
                return;
            }
        }
    }

    log::debug!("Decoder driver shutting down (pipeline disconnected)");
}

/// Decoder, scaler, and stream parameters owned by the driver thread.
struct DriverState {
    stream_index: usize,
    time_base: (i32, i32),
    decoder: VideoDecoder,
    scaler: ScalingContext,
    metadata: VideoMetadata,
}

impl DriverState {
    fn new(input: &Input, stream_index: usize) -> Result<Self, ExtractError> {
        let stream = input
            .stream(stream_index)
            .ok_or(ExtractError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();

        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(ExtractError::DecodeFailure(format!(
                "source reports invalid dimensions {width}×{height}"
            )));
        }

        // Container-level duration; zero when the container does not
        // report one.
        let duration_microseconds = input.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        // Source format → tightly packed RGB24 at native size. Resizing
        // under the dimension policy happens in the render step, not here.
        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        let metadata = VideoMetadata {
            duration,
            width,
            height,
        };

        log::info!(
            "Video source playable: {}×{}, {:.2}s",
            width,
            height,
            duration.as_secs_f64(),
        );

        Ok(Self {
            stream_index,
            time_base: (time_base.numerator(), time_base.denominator()),
            decoder,
            scaler,
            metadata,
        })
    }

    /// Seek to `target` seconds and decode the first frame at or past it.
    fn decode_at(&mut self, input: &mut Input, target: f64) -> Result<RgbImage, ExtractError> {
        // Container seeks take AV_TIME_BASE (microsecond) positions. This
        // lands on the nearest preceding keyframe; we decode forward from
        // there to the requested timestamp.
        let position = Duration::from_secs_f64(target.max(0.0)).as_micros() as i64;
        input.seek(position, ..position)?;
        self.decoder.flush();

        let wanted = target - SEEK_EPSILON_SECONDS;
        let mut decoded = VideoFrame::empty();

        for (stream, packet) in input.packets() {
            if stream.index() != self.stream_index {
                continue;
            }

            self.decoder.send_packet(&packet)?;

            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if self.frame_seconds(&decoded) >= wanted {
                    return self.to_rgb_image(&decoded);
                }
            }
        }

        // Past EOF: flush the decoder and accept the last frame it yields.
        self.decoder.send_eof()?;
        let mut last: Option<RgbImage> = None;
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            last = Some(self.to_rgb_image(&decoded)?);
            if self.frame_seconds(&decoded) >= wanted {
                break;
            }
        }

        last.ok_or_else(|| {
            ExtractError::DecodeFailure(format!("could not decode a frame at {target:.3}s"))
        })
    }

    fn frame_seconds(&self, frame: &VideoFrame) -> f64 {
        let pts = frame.pts().unwrap_or(0);
        let (numerator, denominator) = self.time_base;
        if denominator == 0 {
            return 0.0;
        }
        pts as f64 * numerator as f64 / denominator as f64
    }

    fn to_rgb_image(&mut self, decoded: &VideoFrame) -> Result<RgbImage, ExtractError> {
        let mut rgb_frame = VideoFrame::empty();
        self.scaler.run(decoded, &mut rgb_frame)?;

        let width = self.metadata.width;
        let height = self.metadata.height;
        let buffer = frame_to_rgb_buffer(&rgb_frame, width, height);

        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            ExtractError::DecodeFailure(
                "failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

/// Copy pixel data from an FFmpeg video frame into a tightly-packed RGB
/// buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3);
/// this strips it so the result can be handed to
/// [`image::RgbImage::from_raw`].
fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// FFmpeg internal log verbosity level.
///
/// FFmpeg has its own logging system, separate from the Rust
/// [`log`](https://crates.io/crates/log) crate; by default it prints
/// warnings and errors to stderr. This maps directly to FFmpeg's
/// `AV_LOG_*` constants so callers can silence or tune that output without
/// importing `ffmpeg-next` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Print no output at all.
    Quiet,
    /// Only unrecoverable conditions that abort the process.
    Panic,
    /// Only unrecoverable errors (the context becomes invalid).
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default level).
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging messages.
    Debug,
    /// Extremely verbose tracing output.
    Trace,
}

impl FfmpegLogLevel {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

/// Set the FFmpeg internal log verbosity level.
///
/// This controls what FFmpeg prints to stderr. It does **not** affect
/// Rust-side `log` crate output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}

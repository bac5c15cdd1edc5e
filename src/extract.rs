//! The frame extraction pipeline.
//!
//! [`extract_frames`] drives a decoder through every scheduled timestamp:
//! open → await playable (bounded) → read metadata → plan the schedule and
//! resolve output dimensions → seek to zero and await → per timestamp
//! {seek, await, render, timed encode, collect, report progress} → summary.
//!
//! One sequential pipeline, suspended only at the readiness waits; frames
//! are emitted strictly in increasing timestamp order and progress
//! callbacks fire in that same order. A failure at any step aborts the
//! whole run — already-extracted frames are discarded and no partial
//! result is returned.
//!
//! # Example
//!
//! ```no_run
//! use framepack::{
//!     DimensionPolicy, ExtractOptions, ExtractionRequest, SamplingMode, StillFormat,
//! };
//!
//! let request = ExtractionRequest::new(
//!     SamplingMode::Count,
//!     24,
//!     0.92,
//!     StillFormat::Jpeg,
//!     DimensionPolicy::Mobile { max_width: 720 },
//! )?;
//!
//! let result = framepack::extract_frames("input.webm", &request, &ExtractOptions::new())?;
//! println!(
//!     "{} frames at {}×{}, {:.2} ms/frame",
//!     result.summary.frame_count,
//!     result.summary.output_width,
//!     result.summary.output_height,
//!     result.summary.average_encode_ms,
//! );
//! # Ok::<(), framepack::ExtractError>(())
//! ```

use std::{path::Path, time::Duration, time::Instant};

use crate::{
    config::{ExtractOptions, ExtractionRequest},
    decoder::DecoderHandle,
    dimensions::resolve_dimensions,
    encode::{StillFormat, encode_frame, render_to_size},
    error::ExtractError,
    progress::{ProgressInfo, percent_at},
    readiness::{await_playable, await_seeked},
    schedule::SampleSchedule,
};

/// One extracted, encoded frame.
///
/// Created once per processed timestamp and never mutated afterwards;
/// owned by the result until handed to an archive packager.
#[derive(Debug, Clone)]
pub struct ExtractedFrame {
    /// 1-based ordinal index, in timestamp order.
    pub index: u64,
    /// The encoded image bytes.
    pub bytes: Vec<u8>,
    /// The format the bytes were encoded in.
    pub format: StillFormat,
}

/// Summary metadata for a completed extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSummary {
    /// Number of frames actually extracted. May be less than requested
    /// when the duration is exhausted first.
    pub frame_count: u64,
    /// Arithmetic mean of per-frame encode latency in milliseconds,
    /// rounded to two decimals.
    pub average_encode_ms: f64,
    /// Resolved output width.
    pub output_width: u32,
    /// Resolved output height.
    pub output_height: u32,
}

/// The ordered frames and summary of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted frames in increasing timestamp order.
    pub frames: Vec<ExtractedFrame>,
    /// Run summary.
    pub summary: ExtractionSummary,
}

/// Extract frames from a video file.
///
/// Opens the source on a fresh FFmpeg decoder driver and runs the
/// pipeline against it.
///
/// # Errors
///
/// - [`ExtractError::SourceOpen`] / [`ExtractError::NoVideoStream`] when
///   the source cannot be opened.
/// - [`ExtractError::PlayableTimeout`] when the decoder never becomes
///   playable within the configured bound; zero frames are produced.
/// - [`ExtractError::SeekTimeout`], [`ExtractError::DecodeFailure`], or
///   [`ExtractError::EncodeFailure`] mid-run; the whole run is aborted.
pub fn extract_frames<P: AsRef<Path>>(
    path: P,
    request: &ExtractionRequest,
    options: &ExtractOptions,
) -> Result<ExtractionResult, ExtractError> {
    let handle = DecoderHandle::open(path)?;
    extract_with_decoder(handle, request, options)
}

/// Extract frames using an already-opened decoder handle.
///
/// Admits custom decoder backends built on
/// [`DecoderHandle::from_channels`]. The handle is consumed: the pipeline
/// owns the decoder exclusively for the run and releases it on every exit
/// path, including early failure.
pub fn extract_with_decoder(
    handle: DecoderHandle,
    request: &ExtractionRequest,
    options: &ExtractOptions,
) -> Result<ExtractionResult, ExtractError> {
    // Init → AwaitingPlayable: bounded wait, fatal on timeout.
    let metadata = await_playable(&handle, options.playable_timeout)?;
    let duration = metadata.duration_seconds();

    let schedule = SampleSchedule::plan(request.mode(), request.param(), duration);
    let (output_width, output_height) =
        resolve_dimensions(&request.policy(), metadata.width, metadata.height);

    log::info!(
        "Extracting frames: mode={}, param={}, step={:.4}s, output={}×{}",
        request.mode().name(),
        request.param(),
        schedule.time_step(),
        output_width,
        output_height,
    );

    // AwaitingPlayable → Ready: rewind to the start before sampling.
    handle.seek(0.0)?;
    await_seeked(&handle, options.seek_timeout)?;

    let mut frames = Vec::new();
    let mut encode_timings_ms = Vec::new();

    for timestamp in schedule.timestamps() {
        // SeekingFrame: position the decoder and wait for confirmation.
        handle.seek(timestamp)?;
        let decoded = await_seeked(&handle, options.seek_timeout)?;

        // Rendering: scale from native to the resolved output size.
        let rendered = render_to_size(decoded, output_width, output_height);

        // Encoding: timed per frame.
        let encode_start = Instant::now();
        let bytes = encode_frame(&rendered, request.format(), request.quality())?;
        encode_timings_ms.push(encode_start.elapsed().as_secs_f64() * 1000.0);

        // Collected.
        frames.push(ExtractedFrame {
            index: frames.len() as u64 + 1,
            bytes,
            format: request.format(),
        });

        options.progress.on_progress(&ProgressInfo {
            percent: percent_at(timestamp, duration),
            frames_collected: frames.len() as u64,
            timestamp: Duration::from_secs_f64(timestamp),
        });
    }

    let summary = ExtractionSummary {
        frame_count: frames.len() as u64,
        average_encode_ms: rounded_mean(&encode_timings_ms),
        output_width,
        output_height,
    };

    log::info!(
        "Extraction complete: {} frames, {:.2} ms/frame average encode",
        summary.frame_count,
        summary.average_encode_ms,
    );

    Ok(ExtractionResult { frames, summary })
}

/// Arithmetic mean rounded to two decimals; zero for an empty slice.
fn rounded_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean * 100.0).round() / 100.0
}

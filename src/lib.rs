//! # framepack
//!
//! Sample still frames from a video at computed timestamps and pack them
//! into a single ZIP archive.
//!
//! `framepack` schedules capture timestamps from a sampling mode (a frame
//! rate or a total count), drives an FFmpeg-backed decoder through each
//! one, renders every frame under a configurable dimension policy, encodes
//! it to PNG or JPEG via the [`image`] crate, and hands the ordered result
//! to an archive packager.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framepack::{
//!     ArchivePackager, DimensionPolicy, ExtractOptions, ExtractionRequest,
//!     SamplingMode, StillFormat, ZipPackager, named_entries,
//! };
//!
//! // 12 PNG frames spread evenly over the source.
//! let request = ExtractionRequest::new(
//!     SamplingMode::Count,
//!     12,
//!     1.0,
//!     StillFormat::Png,
//!     DimensionPolicy::Original,
//! )?;
//!
//! let result = framepack::extract_frames("input.webm", &request, &ExtractOptions::new())?;
//!
//! let entries = named_entries(&result.frames, "frame-{{id}}.png");
//! let archive = ZipPackager::new().pack(&entries)?;
//! std::fs::write("frames.zip", archive)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Pipeline
//!
//! One sequential flow of control per extraction run:
//!
//! 1. Open the source on a fresh decoder driver thread
//!    ([`DecoderHandle::open`]).
//! 2. Block (bounded, default 3 s) until the driver signals playable and
//!    read the [`VideoMetadata`].
//! 3. Plan the capture timestamps ([`SampleSchedule`]) and resolve output
//!    dimensions ([`resolve_dimensions`]).
//! 4. For each timestamp: seek, block (bounded) for confirmation, render
//!    at the resolved size, encode, collect, report progress.
//! 5. Return the ordered frames plus timing summary.
//!
//! Frames are emitted strictly in increasing timestamp order; no two
//! frames are processed concurrently. A failure at any step aborts the
//! whole run and no partial result is returned.
//!
//! ## Custom decoder backends
//!
//! The pipeline talks to its decoder over a channel handshake
//! ([`DecoderCommand`] / [`DecoderEvent`]). [`DecoderHandle::from_channels`]
//! plus [`extract_with_decoder`] let any backend that speaks the protocol
//! stand in for FFmpeg — the crate's own end-to-end tests run against
//! scripted drivers this way.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system for the
//! default decoder backend.

pub mod config;
pub mod decoder;
pub mod dimensions;
pub mod encode;
pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod metadata;
pub mod packager;
pub mod progress;
pub mod readiness;
pub mod schedule;

pub use config::{
    COUNT_RANGE, DEFAULT_PLAYABLE_TIMEOUT, DEFAULT_SEEK_TIMEOUT, ExtractOptions,
    ExtractionRequest, QUALITY_RANGE, RATE_RANGE, SamplingMode,
};
pub use decoder::{DecoderCommand, DecoderEvent, DecoderHandle};
pub use dimensions::{
    DEFAULT_MOBILE_MAX_WIDTH, DimensionPolicy, MOBILE_WIDTH_PRESETS, resolve_dimensions,
};
pub use encode::{StillFormat, encode_frame, render_to_size};
pub use error::ExtractError;
pub use extract::{
    ExtractedFrame, ExtractionResult, ExtractionSummary, extract_frames, extract_with_decoder,
};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::VideoMetadata;
pub use packager::{
    ArchiveEntry, ArchivePackager, NAME_TEMPLATE_PLACEHOLDER, ZipPackager, frame_file_name,
    named_entries,
};
pub use progress::{ProgressCallback, ProgressInfo};
pub use readiness::{await_playable, await_seeked};
pub use schedule::{SampleSchedule, Timestamps};

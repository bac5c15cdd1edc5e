//! End-to-end pipeline tests against scripted decoder drivers.

mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use common::{Behavior, scripted_decoder, source};
use framepack::{
    DimensionPolicy, ExtractError, ExtractOptions, ExtractionRequest, ProgressCallback,
    ProgressInfo, SamplingMode, StillFormat, extract_with_decoder,
};

fn request(
    mode: SamplingMode,
    param: u32,
    format: StillFormat,
    policy: DimensionPolicy,
) -> ExtractionRequest {
    ExtractionRequest::new(mode, param, 1.0, format, policy).unwrap()
}

/// Records every progress report, in delivery order.
struct RecordingProgress {
    reports: Arc<Mutex<Vec<ProgressInfo>>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.reports.lock().unwrap().push(*info);
    }
}

fn recording_options() -> (ExtractOptions, Arc<Mutex<Vec<ProgressInfo>>>) {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let options = ExtractOptions::new().with_progress(Arc::new(RecordingProgress {
        reports: Arc::clone(&reports),
    }));
    (options, reports)
}

// ── Count mode ─────────────────────────────────────────────────────

#[test]
fn count_mode_collects_the_requested_frames() {
    let (handle, seeks) = scripted_decoder(source(10.0, 640, 480), Behavior::AnswerAll);
    let (options, reports) = recording_options();
    let request = request(
        SamplingMode::Count,
        5,
        StillFormat::Png,
        DimensionPolicy::Original,
    );

    let result = extract_with_decoder(handle, &request, &options).unwrap();

    assert_eq!(result.summary.frame_count, 5);
    assert_eq!(result.summary.output_width, 640);
    assert_eq!(result.summary.output_height, 480);
    assert!(result.summary.average_encode_ms >= 0.0);

    let indexes: Vec<u64> = result.frames.iter().map(|f| f.index).collect();
    assert_eq!(indexes, vec![1, 2, 3, 4, 5]);

    // The rewind to zero precedes the sampled timestamps.
    assert_eq!(
        *seeks.lock().unwrap(),
        vec![0.0, 0.0, 2.0, 4.0, 6.0, 8.0],
    );

    let reports = reports.lock().unwrap();
    let percents: Vec<u8> = reports.iter().map(|r| r.percent).collect();
    assert_eq!(percents, vec![0, 20, 40, 60, 80]);

    let collected: Vec<u64> = reports.iter().map(|r| r.frames_collected).collect();
    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
    assert_eq!(reports.last().unwrap().timestamp, Duration::from_secs(8));
}

// ── Rate mode ──────────────────────────────────────────────────────

#[test]
fn rate_mode_runs_to_the_end_of_the_source() {
    let (handle, _) = scripted_decoder(source(4.0, 320, 240), Behavior::AnswerAll);
    let (options, reports) = recording_options();
    let request = request(
        SamplingMode::Rate,
        2,
        StillFormat::Png,
        DimensionPolicy::Original,
    );

    let result = extract_with_decoder(handle, &request, &options).unwrap();

    // 2 fps over 4 seconds, endpoints included: 0, 0.5, …, 4.0.
    assert_eq!(result.summary.frame_count, 9);

    let reports = reports.lock().unwrap();
    let percents: Vec<u8> = reports.iter().map(|r| r.percent).collect();
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    // The last timestamp lands exactly on the duration.
    assert_eq!(*percents.last().unwrap(), 100);
}

// ── Output dimensions and formats ──────────────────────────────────

#[test]
fn custom_dimensions_shape_the_encoded_frames() {
    let (handle, _) = scripted_decoder(source(6.0, 1920, 1080), Behavior::AnswerAll);
    let request = request(
        SamplingMode::Count,
        2,
        StillFormat::Png,
        DimensionPolicy::Custom {
            width: 100,
            height: 50,
        },
    );

    let result = extract_with_decoder(handle, &request, &ExtractOptions::new()).unwrap();

    assert_eq!(result.summary.output_width, 100);
    assert_eq!(result.summary.output_height, 50);
    for frame in &result.frames {
        let decoded = image::load_from_memory(&frame.bytes).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
    }
}

#[test]
fn jpeg_frames_carry_jpeg_bytes() {
    let (handle, _) = scripted_decoder(source(2.0, 64, 64), Behavior::AnswerAll);
    let request = ExtractionRequest::new(
        SamplingMode::Count,
        1,
        0.85,
        StillFormat::Jpeg,
        DimensionPolicy::Original,
    )
    .unwrap();

    let result = extract_with_decoder(handle, &request, &ExtractOptions::new()).unwrap();

    let frame = &result.frames[0];
    assert_eq!(frame.format, StillFormat::Jpeg);
    assert_eq!(&frame.bytes[..2], [0xff, 0xd8]);
}

// ── Failure paths ──────────────────────────────────────────────────

#[test]
fn unplayable_source_times_out_with_zero_frames() {
    let (handle, _) = scripted_decoder(source(10.0, 640, 480), Behavior::NeverPlayable);
    let options = ExtractOptions::new().with_playable_timeout(Duration::from_millis(50));
    let request = request(
        SamplingMode::Count,
        5,
        StillFormat::Png,
        DimensionPolicy::Original,
    );

    let error = extract_with_decoder(handle, &request, &options).unwrap_err();
    assert!(matches!(error, ExtractError::PlayableTimeout(_)));
}

#[test]
fn stalled_seek_times_out() {
    // The driver answers only the rewind, then goes silent.
    let (handle, _) = scripted_decoder(source(10.0, 640, 480), Behavior::SilentAfter(1));
    let options = ExtractOptions::new().with_seek_timeout(Duration::from_millis(50));
    let request = request(
        SamplingMode::Count,
        5,
        StillFormat::Png,
        DimensionPolicy::Original,
    );

    let error = extract_with_decoder(handle, &request, &options).unwrap_err();
    assert!(matches!(error, ExtractError::SeekTimeout(_)));
}

#[test]
fn mid_run_decode_error_aborts_the_run() {
    // Rewind and first sample succeed, the second sample fails.
    let (handle, seeks) = scripted_decoder(source(10.0, 640, 480), Behavior::ErrorAfter(2));
    let (options, reports) = recording_options();
    let request = request(
        SamplingMode::Count,
        5,
        StillFormat::Png,
        DimensionPolicy::Original,
    );

    let error = extract_with_decoder(handle, &request, &options).unwrap_err();
    assert!(matches!(error, ExtractError::DecodeFailure(_)));

    // The run stopped at the failing seek; nothing after it was attempted.
    assert_eq!(*seeks.lock().unwrap(), vec![0.0, 0.0, 2.0]);
    assert_eq!(reports.lock().unwrap().len(), 1);
}

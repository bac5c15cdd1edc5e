//! SampleSchedule and Timestamps tests.

use framepack::{SampleSchedule, SamplingMode};

fn stamps(mode: SamplingMode, param: u32, duration: f64) -> Vec<f64> {
    SampleSchedule::plan(mode, param, duration)
        .timestamps()
        .collect()
}

// ── Count mode ─────────────────────────────────────────────────────

#[test]
fn count_mode_spreads_frames_over_duration() {
    // 10-second source, 5 frames: 0, 2, 4, 6, 8.
    assert_eq!(
        stamps(SamplingMode::Count, 5, 10.0),
        vec![0.0, 2.0, 4.0, 6.0, 8.0],
    );
}

#[test]
fn count_mode_emits_exactly_param_frames() {
    for param in [1, 2, 3, 7, 30, 360] {
        let schedule = SampleSchedule::plan(SamplingMode::Count, param, 60.0);
        assert_eq!(
            schedule.expected_frames(),
            u64::from(param),
            "count mode with param {param}",
        );
        assert_eq!(schedule.frame_limit(), Some(u64::from(param)));
    }
}

#[test]
fn count_mode_single_frame_lands_at_zero() {
    assert_eq!(stamps(SamplingMode::Count, 1, 7.5), vec![0.0]);
}

#[test]
fn count_mode_with_zero_duration_emits_at_zero() {
    // Zero duration makes the step zero; the frame limit still bounds the
    // sequence, all at timestamp 0.
    assert_eq!(stamps(SamplingMode::Count, 3, 0.0), vec![0.0, 0.0, 0.0]);
}

// ── Rate mode ──────────────────────────────────────────────────────

#[test]
fn rate_mode_is_bounded_by_duration_alone() {
    // 4-second source at 2 fps: 0, 0.5, …, 4.0 — nine frames.
    let stamps = stamps(SamplingMode::Rate, 2, 4.0);
    assert_eq!(stamps.len(), 9);
    assert_eq!(stamps[0], 0.0);
    assert_eq!(*stamps.last().unwrap(), 4.0);

    let schedule = SampleSchedule::plan(SamplingMode::Rate, 2, 4.0);
    assert_eq!(schedule.frame_limit(), None);
    assert_eq!(schedule.time_step(), 0.5);
}

#[test]
fn rate_mode_never_exceeds_duration() {
    for rate in [1, 3, 24, 60] {
        let stamps = stamps(SamplingMode::Rate, rate, 2.7);
        assert!(!stamps.is_empty());
        assert!(
            stamps.iter().all(|&t| (0.0..=2.7).contains(&t)),
            "rate {rate} produced a timestamp outside [0, duration]",
        );
    }
}

#[test]
fn rate_mode_with_zero_duration_emits_one_frame() {
    assert_eq!(stamps(SamplingMode::Rate, 4, 0.0), vec![0.0]);
}

// ── Ordering and restartability ────────────────────────────────────

#[test]
fn timestamps_are_strictly_increasing() {
    let stamps = stamps(SamplingMode::Rate, 30, 10.0);
    for pair in stamps.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn schedule_is_restartable() {
    // The plan is stateless; each timestamps() call starts over.
    let schedule = SampleSchedule::plan(SamplingMode::Count, 4, 8.0);
    let first: Vec<f64> = schedule.timestamps().collect();
    let second: Vec<f64> = schedule.timestamps().collect();
    assert_eq!(first, second);
}

#[test]
fn expected_frames_matches_iteration() {
    for (mode, param, duration) in [
        (SamplingMode::Count, 5, 10.0),
        (SamplingMode::Rate, 2, 4.0),
        (SamplingMode::Rate, 7, 3.3),
        (SamplingMode::Count, 100, 1.0),
    ] {
        let schedule = SampleSchedule::plan(mode, param, duration);
        assert_eq!(
            schedule.expected_frames() as usize,
            schedule.timestamps().count(),
        );
    }
}

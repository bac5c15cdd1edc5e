//! Timestamp scheduling.
//!
//! [`SampleSchedule`] turns a sampling mode, its parameter, and the source
//! duration into a time step and an optional frame limit, and produces the
//! lazy, ordered sequence of capture timestamps
//! `0, step, 2*step, …` that the extractor drives the decoder through.
//!
//! Planning is pure: a schedule can be re-planned from the same parameters
//! at any time, but each [`Timestamps`] iterator is consumed by one
//! extraction run.

use crate::config::SamplingMode;

/// The computed sampling plan for one extraction run.
///
/// # Example
///
/// ```
/// use framepack::{SampleSchedule, SamplingMode};
///
/// // 5 frames spread over a 10-second source: 0, 2, 4, 6, 8.
/// let schedule = SampleSchedule::plan(SamplingMode::Count, 5, 10.0);
/// let stamps: Vec<f64> = schedule.timestamps().collect();
/// assert_eq!(stamps, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSchedule {
    time_step: f64,
    frame_limit: Option<u64>,
    duration: f64,
}

impl SampleSchedule {
    /// Compute the time step and frame limit for a sampling mode.
    ///
    /// - [`SamplingMode::Rate`]: `time_step = 1/param`, no frame limit —
    ///   the sequence is bounded by the duration alone.
    /// - [`SamplingMode::Count`]: `time_step = duration/param`, limit
    ///   `param`. Rounding in the step can make the last timestamp exceed
    ///   the duration, in which case fewer than `param` frames are emitted.
    pub fn plan(mode: SamplingMode, param: u32, duration: f64) -> Self {
        let (time_step, frame_limit) = match mode {
            SamplingMode::Rate => (1.0 / f64::from(param), None),
            SamplingMode::Count => (duration / f64::from(param), Some(u64::from(param))),
        };

        Self {
            time_step,
            frame_limit,
            duration,
        }
    }

    /// Seconds between consecutive capture timestamps.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Upper bound on emitted frames, if the mode imposes one.
    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    /// The number of timestamps this schedule will emit.
    ///
    /// Walks the same arithmetic as [`timestamps`](Self::timestamps), so
    /// the result is exact even when floating-point accumulation trims the
    /// final step.
    pub fn expected_frames(&self) -> u64 {
        self.timestamps().count() as u64
    }

    /// The lazy, ordered sequence of capture timestamps.
    ///
    /// Yields `0, step, 2*step, …` while the timestamp does not exceed the
    /// duration and the frame limit (if any) has not been reached.
    pub fn timestamps(&self) -> Timestamps {
        Timestamps {
            next: 0.0,
            emitted: 0,
            schedule: self.clone(),
        }
    }
}

/// Iterator over the capture timestamps of a [`SampleSchedule`].
#[derive(Debug, Clone)]
pub struct Timestamps {
    next: f64,
    emitted: u64,
    schedule: SampleSchedule,
}

impl Iterator for Timestamps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next > self.schedule.duration {
            return None;
        }
        if let Some(limit) = self.schedule.frame_limit {
            if self.emitted >= limit {
                return None;
            }
        }

        let timestamp = self.next;
        self.next += self.schedule.time_step;
        self.emitted += 1;
        Some(timestamp)
    }
}

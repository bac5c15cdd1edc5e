//! Scripted decoder drivers for deterministic end-to-end tests.
//!
//! These speak the same channel protocol as the FFmpeg driver, via
//! [`DecoderHandle::from_channels`], so the pipeline under test is the
//! real one — only the decoding backend is scripted.

use std::{
    sync::{Arc, Mutex, mpsc},
    thread,
};

use framepack::{DecoderCommand, DecoderEvent, DecoderHandle, VideoMetadata};
use image::RgbImage;

/// How the scripted driver behaves after opening.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Never signal playable; stay connected until the pipeline gives up.
    NeverPlayable,
    /// Answer every seek with a decoded frame.
    AnswerAll,
    /// Answer the first `n` seeks, then go silent while staying connected.
    SilentAfter(usize),
    /// Answer the first `n` seeks, then report a fatal decode error.
    ErrorAfter(usize),
}

/// Spawn a scripted driver. Returns the pipeline-side handle and the log
/// of seek targets the driver received, in order.
pub fn scripted_decoder(
    metadata: VideoMetadata,
    behavior: Behavior,
) -> (DecoderHandle, Arc<Mutex<Vec<f64>>>) {
    let (command_tx, command_rx) = mpsc::channel::<DecoderCommand>();
    let (event_tx, event_rx) = mpsc::channel::<DecoderEvent>();
    let seeks = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seeks);
    let (width, height) = (metadata.width, metadata.height);

    thread::spawn(move || {
        if matches!(behavior, Behavior::NeverPlayable) {
            // Hold the event channel open until the pipeline drops its
            // handle, so the wait ends in a timeout rather than a
            // disconnect.
            while command_rx.recv().is_ok() {}
            return;
        }

        if event_tx.send(DecoderEvent::Playable(metadata)).is_err() {
            return;
        }

        let mut answered = 0usize;
        while let Ok(DecoderCommand::Seek(timestamp)) = command_rx.recv() {
            recorded.lock().unwrap().push(timestamp);

            match behavior {
                Behavior::SilentAfter(n) if answered >= n => continue,
                Behavior::ErrorAfter(n) if answered >= n => {
                    let _ = event_tx.send(DecoderEvent::Error("scripted decode failure".into()));
                    return;
                }
                _ => {}
            }

            let frame = RgbImage::from_pixel(width, height, image::Rgb([200, 60, 20]));
            if event_tx.send(DecoderEvent::Seeked(frame)).is_err() {
                return;
            }
            answered += 1;
        }
    });

    (DecoderHandle::from_channels(command_tx, event_rx), seeks)
}

/// Metadata for a scripted source.
pub fn source(duration_seconds: f64, width: u32, height: u32) -> VideoMetadata {
    VideoMetadata {
        duration: std::time::Duration::from_secs_f64(duration_seconds),
        width,
        height,
    }
}

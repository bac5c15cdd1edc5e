//! Archive packaging.
//!
//! The extraction pipeline hands its ordered frames to an
//! [`ArchivePackager`], which turns named byte buffers into a single
//! archive byte stream. The trait only requires that insertion order is
//! preserved as file order; the archive's internal format is the
//! implementation's business. [`ZipPackager`] is the bundled ZIP-backed
//! implementation.
//!
//! File names come from a template containing the `{{id}}` placeholder,
//! replaced per frame with the 1-based index zero-padded to the decimal
//! digit width of the total frame count (12 frames → `frame-01.png` …
//! `frame-12.png`).

use std::io::{Cursor, Write};

use zip::{ZipWriter, write::SimpleFileOptions};

use crate::{error::ExtractError, extract::ExtractedFrame};

/// Placeholder token replaced with the zero-padded frame index.
pub const NAME_TEMPLATE_PLACEHOLDER: &str = "{{id}}";

/// One named entry bound for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File name inside the archive.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Produces one archive byte stream from an ordered list of entries.
///
/// Implementations must preserve insertion order as file order.
pub trait ArchivePackager {
    /// Pack the entries into a single archive blob.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ArchiveError`] when the archive cannot be
    /// produced.
    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExtractError>;
}

/// ZIP-backed [`ArchivePackager`] (deflate compression).
///
/// # Example
///
/// ```
/// use framepack::{ArchiveEntry, ArchivePackager, ZipPackager};
///
/// let entries = vec![ArchiveEntry {
///     name: "frame-1.png".to_string(),
///     bytes: vec![0x89, 0x50, 0x4e, 0x47],
/// }];
/// let archive = ZipPackager::new().pack(&entries).unwrap();
/// assert!(!archive.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackager;

impl ZipPackager {
    /// Create a packager with default (deflate) compression.
    pub fn new() -> Self {
        Self
    }
}

impl ArchivePackager for ZipPackager {
    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExtractError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options = SimpleFileOptions::default();

        for entry in entries {
            writer
                .start_file(entry.name.as_str(), file_options)
                .map_err(|error| ExtractError::ArchiveError(error.to_string()))?;
            writer
                .write_all(&entry.bytes)
                .map_err(|error| ExtractError::ArchiveError(error.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|error| ExtractError::ArchiveError(error.to_string()))?;

        Ok(cursor.into_inner())
    }
}

/// Render the file name for one frame.
///
/// Replaces [`NAME_TEMPLATE_PLACEHOLDER`] in `template` with the 1-based
/// `index` zero-padded to the decimal digit width of `total`.
pub fn frame_file_name(template: &str, index: u64, total: u64) -> String {
    let pad_width = total.max(1).to_string().len();
    template.replace(
        NAME_TEMPLATE_PLACEHOLDER,
        &format!("{index:0pad_width$}"),
    )
}

/// Name extracted frames per the template, preserving their order.
pub fn named_entries(frames: &[ExtractedFrame], template: &str) -> Vec<ArchiveEntry> {
    let total = frames.len() as u64;
    frames
        .iter()
        .map(|frame| ArchiveEntry {
            name: frame_file_name(template, frame.index, total),
            bytes: frame.bytes.clone(),
        })
        .collect()
}

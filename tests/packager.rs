//! Archive naming and ZIP packaging tests.

use std::io::{Cursor, Read};

use framepack::{
    ArchiveEntry, ArchivePackager, ExtractedFrame, StillFormat, ZipPackager, frame_file_name,
    named_entries,
};

fn frames(count: u64) -> Vec<ExtractedFrame> {
    (1..=count)
        .map(|index| ExtractedFrame {
            index,
            bytes: format!("frame {index}").into_bytes(),
            format: StillFormat::Png,
        })
        .collect()
}

// ── Name templates ─────────────────────────────────────────────────

#[test]
fn padding_follows_total_digit_width() {
    assert_eq!(frame_file_name("frame-{{id}}.png", 3, 9), "frame-3.png");
    assert_eq!(frame_file_name("frame-{{id}}.png", 3, 12), "frame-03.png");
    assert_eq!(frame_file_name("frame-{{id}}.png", 3, 100), "frame-003.png");
    assert_eq!(
        frame_file_name("frame-{{id}}.png", 100, 100),
        "frame-100.png",
    );
}

#[test]
fn template_without_placeholder_is_unchanged() {
    assert_eq!(frame_file_name("still.png", 5, 12), "still.png");
}

#[test]
fn twelve_frames_get_two_digit_names() {
    let entries = named_entries(&frames(12), "frame-{{id}}.png");
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names[0], "frame-01.png");
    assert_eq!(names[8], "frame-09.png");
    assert_eq!(names[11], "frame-12.png");
}

#[test]
fn entries_preserve_frame_order_and_bytes() {
    let entries = named_entries(&frames(3), "{{id}}.png");
    assert_eq!(entries.len(), 3);
    for (position, entry) in entries.iter().enumerate() {
        assert_eq!(entry.bytes, format!("frame {}", position + 1).into_bytes());
    }
}

// ── ZIP packaging ──────────────────────────────────────────────────

#[test]
fn zip_round_trips_names_order_and_contents() {
    let entries = named_entries(&frames(12), "frame-{{id}}.png");
    let blob = ZipPackager::new().pack(&entries).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(blob)).unwrap();
    assert_eq!(archive.len(), 12);

    for position in 0..archive.len() {
        let mut file = archive.by_index(position).unwrap();
        assert_eq!(file.name(), format!("frame-{:02}.png", position + 1));

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, format!("frame {}", position + 1).into_bytes());
    }
}

#[test]
fn empty_entry_list_yields_empty_archive() {
    let blob = ZipPackager::new().pack(&[]).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(blob)).unwrap();
    assert_eq!(archive.len(), 0);
}

#[test]
fn archive_written_to_disk_reads_back() {
    let entries = named_entries(&frames(3), "frame-{{id}}.png");
    let blob = ZipPackager::new().pack(&entries).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frames.zip");
    std::fs::write(&path, &blob).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 3);
}

#[test]
fn packager_accepts_raw_entries() {
    let entries = vec![
        ArchiveEntry {
            name: "a.txt".to_string(),
            bytes: b"alpha".to_vec(),
        },
        ArchiveEntry {
            name: "b.txt".to_string(),
            bytes: b"beta".to_vec(),
        },
    ];
    let blob = ZipPackager::new().pack(&entries).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(blob)).unwrap();
    let mut file = archive.by_name("b.txt").unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "beta");
}

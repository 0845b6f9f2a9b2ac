//! Document-level tests for schedview
//!
//! Flat JSON documents in, layouts and scenes out.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use schedview::render::render_scene;
use schedview::{layout_document, layout_json, GridLayout, ScheduleConfig, ScheduleDocument, ScheduleError};

const CONFERENCE: &str = r#"{
    "rowLabels": ["09:00", "10:00", "11:00", "12:00", "13:00", "14:00"],
    "columns": [
        {"id": "main", "label": "Main stage", "link": "/stages/main"},
        {"id": "side", "label": "Side room"}
    ],
    "blocks": [
        {"label": "Keynote", "main": "Welcome", "row": 0, "columnId": "main", "height": 2},
        {"main": "Lightning talks", "row": 1, "columnId": "main", "height": 1, "link": "/talks"},
        {"main": "Lunch", "row": 3, "columnId": "side", "height": 2},
        {"label": "Panel", "main": "Rust in production", "row": 1, "columnId": "main", "height": 3},
        {"main": "Closing", "row": 5, "columnId": "main", "height": 1}
    ]
}"#;

fn lanes(layout: &GridLayout, column: &str) -> Vec<u32> {
    layout
        .column(column)
        .unwrap()
        .blocks
        .iter()
        .map(|b| b.lane)
        .collect()
}

#[test]
fn test_conference_layout() {
    let document = ScheduleDocument::from_json(CONFERENCE).unwrap();
    let layout = layout_document(document, 10.0).unwrap();

    assert_eq!(layout.row_count, 6);
    // Keynote, lightning talks and panel all meet at row 1.
    assert_eq!(lanes(&layout, "main"), vec![0, 1, 2, 0]);
    assert_eq!(layout.column("main").unwrap().max_lane, Some(2));
    assert_eq!(lanes(&layout, "side"), vec![0]);
    assert_eq!(layout.column("side").unwrap().max_lane, Some(0));

    let closing = layout.column("main").unwrap().blocks[3];
    assert_eq!((closing.left_offset, closing.right_offset), (0.0, 20.0));
}

#[test]
fn test_layout_json_round_trips_through_serde() {
    let json = layout_json(CONFERENCE, 4.0).unwrap();
    let layout: GridLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(layout.adjacent_step, 4.0);
    assert_eq!(layout.columns.len(), 2);
    assert!(json.contains("\"maxLane\":2"));
    assert!(json.contains("\"leftOffset\""));
}

#[test]
fn test_document_with_overlong_block() {
    let doc = r#"{
        "rowLabels": ["a", "b", "c", "d", "e", "f"],
        "columns": [{"id": "x"}],
        "blocks": [{"main": "too long", "row": 4, "columnId": "x", "height": 3}]
    }"#;
    let err = layout_document(ScheduleDocument::from_json(doc).unwrap(), 10.0).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidSpan { start_row: 4, span: 3, .. }));
    assert!(err.to_string().contains("column 'x'"));
}

#[test]
fn test_document_from_path() {
    let path = std::env::temp_dir().join(format!("schedview-conference-{}.json", std::process::id()));
    std::fs::write(&path, CONFERENCE).unwrap();
    let document = ScheduleDocument::from_path(&path);
    std::fs::remove_file(&path).unwrap();

    let layout = layout_document(document.unwrap(), 10.0).unwrap();
    assert_eq!(lanes(&layout, "main"), vec![0, 1, 2, 0]);
}

#[test]
fn test_missing_document_file_is_io_error() {
    let path = std::env::temp_dir().join("schedview-no-such-dir").join("schedule.json");
    let err = ScheduleDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, ScheduleError::Io(_)));
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn test_document_with_negative_step() {
    let document = ScheduleDocument::from_json(CONFERENCE).unwrap();
    assert!(matches!(
        layout_document(document, -10.0),
        Err(ScheduleError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_document_with_zero_height_block() {
    let doc = r#"{
        "rowLabels": ["a"],
        "columns": [{"id": "x"}],
        "blocks": [{"row": 0, "columnId": "x", "height": 0}]
    }"#;
    let err = layout_document(ScheduleDocument::from_json(doc).unwrap(), 10.0).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
}

#[test]
fn test_conference_scene() {
    let grid = ScheduleDocument::from_json(CONFERENCE)
        .unwrap()
        .into_grid()
        .unwrap();
    let scene = render_scene(&grid, &ScheduleConfig::default()).unwrap();

    assert_eq!(scene.width, 90.0 + 2.0 * 110.0);
    assert_eq!(scene.height, 40.0 + 6.0 * 30.0);
    assert_eq!(scene.blocks.len(), 5);

    let talks = scene
        .blocks
        .iter()
        .find(|b| b.label_text == "Lightning talks")
        .unwrap();
    assert_eq!(talks.lane, 1);
    assert_eq!(talks.rect.x, 10.0);
    assert_eq!(talks.rect.width, 110.0 - 1.0 - 10.0 - 10.0);
    assert_eq!(talks.rect.height, 29.0);
    assert_eq!(talks.link.as_deref(), Some("/talks"));

    let panel = scene.blocks.iter().find(|b| b.label_text == "Panel").unwrap();
    assert_eq!(panel.main_text, "Rust in production");
    assert_eq!(panel.rect.x, 20.0);
    assert_eq!(panel.rect.y, 30.0);
    assert_eq!(panel.rect.height, 89.0);
}

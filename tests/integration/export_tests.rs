//! Integration tests for CSV and JSON export

use crate::common::{loader_for, sheet_of, TestFixture};
use sheetview::export::{export_csv, export_json, read_csv, CSV_MIME_TYPE, JSON_MIME_TYPE};

#[test]
fn test_csv_export_round_trips_awkward_values() {
    let sheet = sheet_of(
        "Sheet1",
        &[
            &["Name", "ملاحظات"],
            &["Ahmed", "said \"hello\", twice"],
            &["Sara", "طالبة متفوقة"],
            &["Omar", ""],
        ],
    );
    let mut loader = loader_for(vec![sheet]);
    let snapshot = loader.load_bytes("notes.xlsx", b"fixture").unwrap();

    let payload = export_csv(&snapshot.file_info, &snapshot.table).unwrap();
    assert_eq!(payload.filename, "notes.csv");
    assert_eq!(payload.mime_type, CSV_MIME_TYPE);
    assert!(payload.bytes.starts_with(b"\xef\xbb\xbf"));

    let parsed = read_csv(&payload.bytes).unwrap();
    assert_eq!(parsed, snapshot.table);
}

#[test]
fn test_exports_are_byte_identical_across_calls() {
    let mut loader = loader_for(vec![sheet_of(
        "Sheet1",
        &[&["A", "B"], &["1", "2"], &["3", "4"]],
    )]);
    let snapshot = loader.load_bytes("data.xlsx", b"fixture").unwrap();

    let csv1 = export_csv(&snapshot.file_info, &snapshot.table).unwrap();
    let csv2 = export_csv(&snapshot.file_info, &snapshot.table).unwrap();
    assert_eq!(csv1.bytes, csv2.bytes);

    let json1 = export_json(&snapshot.file_info, &snapshot.table).unwrap();
    let json2 = export_json(&snapshot.file_info, &snapshot.table).unwrap();
    assert_eq!(json1.bytes, json2.bytes);
}

#[test]
fn test_json_export_carries_file_info_headers_and_rows() {
    let mut loader = loader_for(vec![sheet_of(
        "Roster",
        &[&["Name", "Grade"], &["Ahmed", "7"]],
    )]);
    let snapshot = loader.load_bytes("roster.xlsx", b"fixture").unwrap();

    let payload = export_json(&snapshot.file_info, &snapshot.table).unwrap();
    assert_eq!(payload.filename, "roster.json");
    assert_eq!(payload.mime_type, JSON_MIME_TYPE);

    let value: serde_json::Value = serde_json::from_slice(&payload.bytes).unwrap();
    assert_eq!(value["file_info"]["name"], "roster.xlsx");
    assert_eq!(value["file_info"]["sheet_name"], "Roster");
    assert_eq!(value["headers"], serde_json::json!(["Name", "Grade"]));
    assert_eq!(value["rows"][0]["Name"], "Ahmed");
    assert_eq!(value["rows"][0]["Grade"], "7");

    // Row keys come out in header order
    let row_text = payload
        .bytes
        .windows(6)
        .position(|w| w == b"\"Name\"")
        .unwrap();
    let grade_text = payload
        .bytes
        .windows(7)
        .position(|w| w == b"\"Grade\"")
        .unwrap();
    assert!(row_text < grade_text);
}

#[test]
fn test_cached_preview_exports_like_the_original() {
    let fixture = TestFixture::new().unwrap();

    let mut loader = loader_for(vec![sheet_of(
        "Sheet1",
        &[&["Name", "City"], &["Ahmed", "Riyadh"], &["Sara", "Jeddah"]],
    )]);
    let snapshot = loader.load_bytes("students.xlsx", b"fixture").unwrap();

    let direct = export_csv(&snapshot.file_info, &snapshot.table).unwrap();

    fixture.cache().save(&snapshot).unwrap();
    let restored = fixture.cache().load().expect("snapshot restored");
    let from_cache = export_csv(&restored.file_info, &restored.table).unwrap();

    assert_eq!(direct.bytes, from_cache.bytes);
    assert_eq!(from_cache.filename, "students.csv");
}

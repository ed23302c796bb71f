//! Integration tests for the import pipeline

use crate::common::{loader_for, roster_sheet, sheet_of};
use sheetview::decode::{DecoderProvider, SheetDecoder};
use sheetview::error::{Result, SheetviewError};
use sheetview::loader::SheetLoader;

#[test]
fn test_load_populates_snapshot() {
    let mut loader = loader_for(vec![roster_sheet()]);
    let snapshot = loader.load_bytes("roster.xlsx", b"fixture").unwrap();

    assert_eq!(snapshot.file_info.name, "roster.xlsx");
    assert_eq!(snapshot.file_info.sheet_name, "Sheet1");
    assert_eq!(snapshot.file_info.row_count, 3);
    assert_eq!(snapshot.table.headers, vec!["Name", "Grade", "Phone"]);
    assert_eq!(snapshot.table.rows[0]["Name"], "Ahmed");
    assert_eq!(snapshot.table.rows[2]["Phone"], "0503333333");
    assert!(!snapshot.source_digest.is_empty());
}

#[test]
fn test_source_digest_is_deterministic() {
    let mut loader = loader_for(vec![roster_sheet()]);
    let first = loader.load_bytes("roster.xlsx", b"fixture").unwrap();
    let second = loader.load_bytes("roster.xlsx", b"fixture").unwrap();
    let other = loader.load_bytes("roster.xlsx", b"different").unwrap();

    assert_eq!(first.source_digest, second.source_digest);
    assert_ne!(first.source_digest, other.source_digest);
}

#[test]
fn test_load_normalizes_headers() {
    let sheet = sheet_of(
        "Sheet1",
        &[&["Name", "", "Name"], &["Ahmed", "7", "0501111111"]],
    );
    let mut loader = loader_for(vec![sheet]);
    let snapshot = loader.load_bytes("roster.xlsx", b"fixture").unwrap();

    assert_eq!(snapshot.table.headers, vec!["Name", "عمود_2", "Name (2)"]);
    assert_eq!(snapshot.table.rows[0]["عمود_2"], "7");
    assert_eq!(snapshot.table.rows[0]["Name (2)"], "0501111111");
}

#[test]
fn test_load_drops_trailing_blank_rows() {
    let sheet = sheet_of("Sheet1", &[&["A", "B"], &["1", "2"], &["", ""]]);
    let mut loader = loader_for(vec![sheet]);
    let snapshot = loader.load_bytes("data.xlsx", b"fixture").unwrap();

    assert_eq!(snapshot.table.row_count(), 1);
    assert_eq!(snapshot.table.rows[0]["A"], "1");
    assert_eq!(snapshot.table.rows[0]["B"], "2");
}

#[test]
fn test_load_reads_first_sheet_only() {
    let first = sheet_of("Roster", &[&["Name"], &["Ahmed"]]);
    let second = sheet_of("Other", &[&["Ignored"], &["x"]]);
    let mut loader = loader_for(vec![first, second]);
    let snapshot = loader.load_bytes("roster.xlsx", b"fixture").unwrap();

    assert_eq!(snapshot.file_info.sheet_name, "Roster");
    assert_eq!(snapshot.table.headers, vec!["Name"]);
}

#[test]
fn test_load_fails_on_workbook_without_sheets() {
    let mut loader = loader_for(Vec::new());
    let result = loader.load_bytes("empty.xlsx", b"fixture");

    assert!(matches!(result, Err(SheetviewError::Workbook { .. })));
}

#[test]
fn test_load_fails_on_sheet_without_header_row() {
    let mut loader = loader_for(vec![sheet_of("Sheet1", &[])]);
    let result = loader.load_bytes("empty.xlsx", b"fixture");

    assert!(matches!(result, Err(SheetviewError::Workbook { .. })));
}

#[test]
fn test_load_fails_on_sheet_without_data_rows() {
    let mut loader = loader_for(vec![sheet_of("Sheet1", &[&["Name", "Grade"]])]);
    let result = loader.load_bytes("headers_only.xlsx", b"fixture");

    assert!(matches!(result, Err(SheetviewError::Workbook { .. })));
}

#[test]
fn test_load_fails_when_all_data_rows_are_blank() {
    let sheet = sheet_of("Sheet1", &[&["Name", "Grade"], &["", ""], &["", ""]]);
    let mut loader = loader_for(vec![sheet]);
    let result = loader.load_bytes("blank.xlsx", b"fixture");

    assert!(matches!(result, Err(SheetviewError::Workbook { .. })));
}

struct FailingDecoder;

impl SheetDecoder for FailingDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<sheetview::decode::Workbook> {
        Err(SheetviewError::workbook("not a spreadsheet"))
    }
}

#[test]
fn test_decode_failure_is_a_content_error() {
    let provider = DecoderProvider::new(|| Ok(Box::new(FailingDecoder) as Box<dyn SheetDecoder>));
    let mut loader = SheetLoader::with_provider(provider);
    let result = loader.load_bytes("corrupt.xlsx", b"\x00\x01\x02");

    assert!(matches!(result, Err(SheetviewError::Workbook { .. })));
}

#[test]
fn test_unavailable_decoder_fails_distinctly_and_stays_failed() {
    let provider = DecoderProvider::new(|| {
        Err(SheetviewError::decode_unavailable("asset fetch failed"))
    });
    let mut loader = SheetLoader::with_provider(provider);

    let first = loader.load_bytes("roster.xlsx", b"fixture");
    assert!(matches!(
        first,
        Err(SheetviewError::DecodeUnavailable { .. })
    ));

    // The failure is sticky across attempts
    let second = loader.load_bytes("roster.xlsx", b"fixture");
    assert!(matches!(
        second,
        Err(SheetviewError::DecodeUnavailable { .. })
    ));
}

//! Table serialization: CSV and JSON export payloads

use crate::error::Result;
use crate::table::{FileInfo, Record, Table};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// UTF-8 byte-order-mark prefixed to CSV exports for locale compatibility
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
pub const JSON_MIME_TYPE: &str = "application/json";

/// Base name used when the original upload name is unavailable
const FALLBACK_BASE_NAME: &str = "table";

/// A serialized table ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Derive the export filename from the original upload name, replacing its
/// extension
pub fn export_filename(original: Option<&str>, extension: &str) -> String {
    let base = original
        .and_then(|name| Path::new(name).file_stem())
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_BASE_NAME);

    format!("{}.{}", base, extension)
}

/// Serialize a table to CSV: BOM-prefixed, every field double-quoted with
/// internal quotes doubled, rows in header order
pub fn export_csv(file_info: &FileInfo, table: &Table) -> Result<ExportPayload> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(
            table
                .headers
                .iter()
                .map(|header| row.get(header).map(String::as_str).unwrap_or("")),
        )?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    Ok(ExportPayload {
        filename: export_filename(Some(&file_info.name), "csv"),
        mime_type: CSV_MIME_TYPE,
        bytes,
    })
}

/// Document shape written by JSON exports
#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    file_info: &'a FileInfo,
    headers: &'a [String],
    rows: &'a [Record],
}

/// Serialize a table to a pretty-printed JSON document with stable key order
pub fn export_json(file_info: &FileInfo, table: &Table) -> Result<ExportPayload> {
    let document = JsonDocument {
        file_info,
        headers: &table.headers,
        rows: &table.rows,
    };
    let bytes = serde_json::to_vec_pretty(&document)?;

    Ok(ExportPayload {
        filename: export_filename(Some(&file_info.name), "json"),
        mime_type: JSON_MIME_TYPE,
        bytes,
    })
}

/// Read a CSV export back into a table. A leading UTF-8 BOM is tolerated.
pub fn read_csv(bytes: &[u8]) -> Result<Table> {
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new().from_reader(content);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Record = IndexMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), record.get(i).unwrap_or("").to_string());
        }
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

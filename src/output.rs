//! Output formatting utilities

use crate::cache::PreviewSnapshot;
use crate::error::Result;
use crate::table::{Record, Table};

/// Widest cell rendered before truncation in pretty table views
const MAX_CELL_WIDTH: usize = 24;

/// Pretty printer for sheetview output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a summary of a freshly loaded preview
    pub fn print_load_summary(snapshot: &PreviewSnapshot) {
        println!("✅ Loaded '{}'", snapshot.file_info.name);
        println!("├─ Sheet: {}", snapshot.file_info.sheet_name);
        println!("├─ Rows: {}", snapshot.file_info.row_count);
        println!("├─ Columns: {}", snapshot.table.column_count());
        println!("└─ Source digest: {}", short_digest(&snapshot.source_digest));
    }

    /// Print preview metadata and the leading rows of the table
    pub fn print_preview(snapshot: &PreviewSnapshot, limit: usize) {
        println!("📄 Preview: {}", snapshot.file_info.name);
        println!("├─ Sheet: {}", snapshot.file_info.sheet_name);
        println!("├─ Rows: {}", snapshot.table.row_count());
        println!("└─ Source digest: {}", short_digest(&snapshot.source_digest));
        println!();
        Self::print_table(&snapshot.table, limit);
    }

    /// Print the leading rows of a table in a column-aligned layout
    pub fn print_table(table: &Table, limit: usize) {
        let shown: Vec<&Record> = table.rows.iter().take(limit).collect();
        Self::print_rows(&table.headers, &shown);

        if table.rows.len() > shown.len() {
            println!("… and {} more rows", table.rows.len() - shown.len());
        }
    }

    /// Print search results
    pub fn print_search_results(term: &str, headers: &[String], matches: &[&Record], limit: usize) {
        if matches.is_empty() {
            println!("No rows match '{}'.", term);
            return;
        }

        println!("🔎 {} rows match '{}':", matches.len(), term);
        let shown = &matches[..matches.len().min(limit)];
        Self::print_rows(headers, shown);

        if matches.len() > shown.len() {
            println!("… and {} more matching rows", matches.len() - shown.len());
        }
    }

    /// Column-aligned rendering shared by table and search output
    fn print_rows(headers: &[String], rows: &[&Record]) {
        let widths: Vec<usize> = headers
            .iter()
            .map(|header| {
                let mut width = truncate_cell(header).chars().count();
                for row in rows {
                    let value = row.get(header).map(String::as_str).unwrap_or("");
                    width = width.max(truncate_cell(value).chars().count());
                }
                width.max(1)
            })
            .collect();

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| pad(&truncate_cell(header), *width))
            .collect();
        println!("{}", header_line.join(" | "));

        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        println!("{}", separator.join("-+-"));

        for row in rows {
            let line: Vec<String> = headers
                .iter()
                .zip(&widths)
                .map(|(header, width)| {
                    let value = row.get(header).map(String::as_str).unwrap_or("");
                    pad(&truncate_cell(value), *width)
                })
                .collect();
            println!("{}", line.join(" | "));
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format a preview snapshot as a JSON document
    pub fn format_preview(snapshot: &PreviewSnapshot) -> Result<String> {
        let json = serde_json::json!({
            "file_info": snapshot.file_info,
            "source_digest": snapshot.source_digest,
            "headers": snapshot.table.headers,
            "rows": snapshot.table.rows,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

/// Truncate a cell value for display
fn truncate_cell(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    }
}

/// Pad a value to the given display width
fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

/// Shorten a hex digest for display
fn short_digest(digest: &str) -> String {
    if digest.len() <= 12 {
        digest.to_string()
    } else {
        format!("{}…", &digest[..12])
    }
}

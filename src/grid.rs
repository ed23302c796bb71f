//! Raw grid handling: header normalization and row materialization

use crate::table::Record;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A single cell value as produced by the decode capability
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Coerce to the display string stored in materialized records
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// True when the coerced value is blank after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Label assigned to a blank header cell, encoding its 1-based position
fn placeholder_header(position: usize) -> String {
    format!("عمود_{}", position + 1)
}

/// Normalize a raw header row into unique, non-empty column names.
///
/// The output has the same length and order as the input. Blank cells get a
/// positional placeholder; a name colliding with an earlier one gets a
/// parenthesized counter suffix starting at 2. Never fails.
pub fn normalize_headers(raw: &[CellValue]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for (i, cell) in raw.iter().enumerate() {
        let trimmed = cell.display_string().trim().to_string();
        let base = if trimmed.is_empty() {
            placeholder_header(i)
        } else {
            trimmed
        };

        let mut candidate = base.clone();
        let mut counter = 2usize;
        while seen.contains(&candidate) {
            candidate = format!("{} ({})", base, counter);
            counter += 1;
        }

        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

/// Materialize data rows against normalized headers.
///
/// Cells are coerced to display strings and keyed by header in header
/// order; rows shorter than the header sequence are padded with empty
/// strings. Rows whose cells are all blank are dropped so trailing
/// spreadsheet whitespace never produces ghost rows.
pub fn materialize_rows(headers: &[String], data: &[Vec<CellValue>]) -> Vec<Record> {
    let mut rows = Vec::new();

    for raw in data {
        if raw.iter().all(CellValue::is_blank) {
            continue;
        }

        let mut record: Record = IndexMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = raw.get(i).map(CellValue::display_string).unwrap_or_default();
            record.insert(header.clone(), value);
        }
        rows.push(record);
    }

    rows
}

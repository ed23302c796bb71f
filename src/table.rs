//! Core table value type shared across the pipeline

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A materialized row: header name mapped to a display-safe string value,
/// in header order
pub type Record = IndexMap<String, String>;

/// Normalized headers plus materialized rows.
///
/// Every record's key set equals `headers` exactly. A table is replaced
/// wholesale on a new load, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Rows whose fields contain `term` as a case-folded substring, as an
    /// ordered subsequence of `rows`. A blank term matches every row.
    pub fn filter(&self, term: &str) -> Vec<&Record> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.rows.iter().collect();
        }

        self.rows
            .iter()
            .filter(|row| row.values().any(|value| value.to_lowercase().contains(&term)))
            .collect()
    }
}

/// Descriptive metadata for a loaded spreadsheet file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub sheet_name: String,
    pub row_count: usize,
}

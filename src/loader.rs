//! Import pipeline: spreadsheet file to preview snapshot

use crate::cache::PreviewSnapshot;
use crate::decode::{DecoderProvider, Sheet};
use crate::error::{Result, SheetviewError};
use crate::grid::{materialize_rows, normalize_headers, CellValue};
use crate::progress::LoadProgress;
use crate::table::{FileInfo, Table};
use std::path::Path;

/// Check if the upload's file extension is supported
pub fn is_supported_format(path: &Path) -> bool {
    if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
        matches!(extension.to_lowercase().as_str(), "xlsx" | "xls")
    } else {
        false
    }
}

/// Loads spreadsheet files into preview snapshots.
///
/// A load either yields a complete snapshot or an error; no partial state
/// is kept between attempts. Loads are serialized: the exclusive borrow
/// means a second load cannot start while one is in flight.
pub struct SheetLoader {
    provider: DecoderProvider,
    show_progress: bool,
}

impl SheetLoader {
    /// Loader with the built-in calamine decoder and progress spinners
    pub fn new() -> Self {
        Self {
            provider: DecoderProvider::calamine(),
            show_progress: true,
        }
    }

    /// Loader with an injected decode capability and no progress output
    pub fn with_provider(provider: DecoderProvider) -> Self {
        Self {
            provider,
            show_progress: false,
        }
    }

    /// Load a preview snapshot from a spreadsheet file on disk
    pub fn load_path(&mut self, path: &Path) -> Result<PreviewSnapshot> {
        if !is_supported_format(path) {
            return Err(SheetviewError::invalid_input(format!(
                "Unsupported file format: {} (expected .xlsx or .xls)",
                path.display()
            )));
        }

        let mut progress = LoadProgress::new(self.show_progress);

        // The upload must be fully read before decoding is attempted; a
        // read failure surfaces on its own, distinct from decode failures.
        let bytes = std::fs::read(path)?;
        progress.finish_read(&format!("Read {} bytes", bytes.len()));

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();

        self.import(&name, &bytes, &mut progress)
    }

    /// Load a preview snapshot from in-memory upload bytes
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<PreviewSnapshot> {
        let mut progress = LoadProgress::new(self.show_progress);
        progress.finish_read(&format!("Read {} bytes", bytes.len()));
        self.import(name, bytes, &mut progress)
    }

    fn import(
        &mut self,
        name: &str,
        bytes: &[u8],
        progress: &mut LoadProgress,
    ) -> Result<PreviewSnapshot> {
        // The decode capability is acquired only once the bytes are in hand
        let decoder = self.provider.acquire()?;
        let workbook = decoder.decode(bytes)?;

        let sheet = workbook
            .sheets
            .into_iter()
            .next()
            .ok_or_else(|| SheetviewError::workbook(format!("'{}' contains no sheets", name)))?;
        progress.finish_decode(&format!("Decoded sheet '{}'", sheet.name));

        let Sheet {
            name: sheet_name,
            grid,
        } = sheet;

        let mut grid_rows = grid.into_iter();
        let header_row = grid_rows.next().ok_or_else(|| {
            SheetviewError::workbook(format!("sheet '{}' in '{}' has no header row", sheet_name, name))
        })?;

        let headers = normalize_headers(&header_row);
        let data: Vec<Vec<CellValue>> = grid_rows.collect();
        let rows = materialize_rows(&headers, &data);
        if rows.is_empty() {
            return Err(SheetviewError::workbook(format!(
                "sheet '{}' in '{}' has no data rows",
                sheet_name, name
            )));
        }
        progress.finish_rows(&format!("Materialized {} rows", rows.len()));

        let file_info = FileInfo {
            name: name.to_string(),
            sheet_name,
            row_count: rows.len(),
        };
        let source_digest = blake3::hash(bytes).to_hex().to_string();

        log::debug!(
            "Loaded '{}': {} columns, {} rows",
            file_info.name,
            headers.len(),
            rows.len()
        );

        Ok(PreviewSnapshot {
            file_info,
            table: Table::new(headers, rows),
            source_digest,
        })
    }
}

impl Default for SheetLoader {
    fn default() -> Self {
        Self::new()
    }
}

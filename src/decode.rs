//! Spreadsheet decode capability
//!
//! Binary workbook parsing is delegated to calamine behind the
//! [`SheetDecoder`] trait; the rest of the pipeline only sees named sheets
//! of plain cell grids.

use crate::error::{Result, SheetviewError};
use crate::grid::CellValue;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// A decoded workbook: one or more named sheets
#[derive(Debug, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// A single sheet: a 2-D grid of cells with column order preserved
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub grid: Vec<Vec<CellValue>>,
}

/// Decode capability: parse raw workbook bytes into sheets of cell grids,
/// with blank cells defaulted to [`CellValue::Empty`]
pub trait SheetDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Workbook>;
}

/// Production decoder backed by calamine (xlsx and xls)
pub struct CalamineDecoder;

impl SheetDecoder for CalamineDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Workbook> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| SheetviewError::workbook(format!("failed to open workbook: {}", e)))?;

        let names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(names.len());

        for name in names {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                SheetviewError::workbook(format!("failed to read sheet '{}': {}", name, e))
            })?;
            sheets.push(Sheet {
                name,
                grid: range_to_grid(&range),
            });
        }

        Ok(Workbook { sheets })
    }
}

/// Convert a sheet's used range into an array-of-arrays
fn range_to_grid(range: &calamine::Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

/// Factory producing the decode capability on first use
pub type DecoderFactory = Box<dyn Fn() -> Result<Box<dyn SheetDecoder>>>;

/// Lazily acquired decode capability, cached after the first success.
///
/// A failed acquisition is sticky: every later acquire reports the same
/// failure without retrying.
pub enum DecoderProvider {
    Unloaded(DecoderFactory),
    Ready(Box<dyn SheetDecoder>),
    Failed(String),
}

impl DecoderProvider {
    /// Provider for the built-in calamine decoder
    pub fn calamine() -> Self {
        Self::new(|| Ok(Box::new(CalamineDecoder) as Box<dyn SheetDecoder>))
    }

    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn SheetDecoder>> + 'static,
    {
        Self::Unloaded(Box::new(factory))
    }

    /// Acquire the decoder, loading it on first use
    pub fn acquire(&mut self) -> Result<&dyn SheetDecoder> {
        if matches!(self, Self::Unloaded(_)) {
            let state = std::mem::replace(self, Self::Failed(String::new()));
            *self = match state {
                Self::Unloaded(factory) => match factory() {
                    Ok(decoder) => Self::Ready(decoder),
                    Err(e) => Self::Failed(e.to_string()),
                },
                other => other,
            };
        }

        match self {
            Self::Ready(decoder) => Ok(&**decoder),
            Self::Failed(message) => Err(SheetviewError::decode_unavailable(message.clone())),
            Self::Unloaded(_) => Err(SheetviewError::decode_unavailable("decoder not loaded")),
        }
    }
}

//! Error types for sheetview operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetviewError>;

#[derive(Error, Debug)]
pub enum SheetviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet decoder unavailable: {message}")]
    DecodeUnavailable { message: String },

    #[error("Workbook error: {message}")]
    Workbook { message: String },

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Preview cache error: {message}")]
    Cache { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl SheetviewError {
    pub fn decode_unavailable(msg: impl Into<String>) -> Self {
        Self::DecodeUnavailable {
            message: msg.into(),
        }
    }

    pub fn workbook(msg: impl Into<String>) -> Self {
        Self::Workbook {
            message: msg.into(),
        }
    }

    pub fn workspace(msg: impl Into<String>) -> Self {
        Self::Workspace(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}

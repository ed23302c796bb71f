//! Command-line interface for sheetview

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetview")]
#[command(about = "A spreadsheet import, preview, and export tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override workspace location
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import the first sheet of a spreadsheet and cache a preview
    Load {
        /// Input spreadsheet file (.xlsx or .xls)
        input: String,
    },

    /// Display the cached preview
    Show {
        /// Maximum number of rows to display
        #[arg(long, default_value_t = crate::DEFAULT_SHOW_LIMIT, value_parser = validate_limit)]
        limit: usize,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Filter the cached preview's rows by a search term
    Search {
        /// Term matched case-insensitively against every field
        term: String,

        /// Maximum number of matching rows to display
        #[arg(long, default_value_t = crate::DEFAULT_SHOW_LIMIT, value_parser = validate_limit)]
        limit: usize,
    },

    /// Export the cached preview to a file
    Export {
        /// Export format: "csv", "json"
        #[arg(long, default_value = "csv")]
        format: String,

        /// Custom output file path (defaults to a name derived from the upload)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete the cached preview
    Clear,
}

/// Parse export format string
#[derive(Debug, Clone)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid export format: {}. Use 'csv' or 'json'", s)),
        }
    }
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Validate that a display limit is greater than 0
fn validate_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s.parse()
        .map_err(|_| format!("Invalid limit: '{}'. Must be a positive integer.", s))?;

    if limit == 0 {
        return Err("Limit must be greater than 0".to_string());
    }

    Ok(limit)
}

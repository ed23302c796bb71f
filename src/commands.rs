//! Command implementations for the sheetview CLI

use crate::cache::{FileStore, PreviewCache, PreviewSnapshot};
use crate::cli::{Commands, ExportFormat, OutputFormat};
use crate::error::{Result, SheetviewError};
use crate::export;
use crate::loader::SheetLoader;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::workspace::SheetviewWorkspace;
use std::path::{Path, PathBuf};

/// Execute a command
pub fn execute_command(command: Commands, workspace_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Load { input } => load_command(workspace_path, &input),
        Commands::Show { limit, format } => show_command(workspace_path, limit, &format),
        Commands::Search { term, limit } => search_command(workspace_path, &term, limit),
        Commands::Export { format, output } => {
            export_command(workspace_path, &format, output.as_deref())
        }
        Commands::Clear => clear_command(workspace_path),
    }
}

/// Open the preview cache inside the resolved workspace
fn open_cache(workspace_path: Option<&Path>) -> Result<PreviewCache<FileStore>> {
    let workspace = SheetviewWorkspace::find_or_create(workspace_path)?;
    Ok(PreviewCache::new(FileStore::new(workspace.store_dir())))
}

/// Restore the cached preview or explain how to create one
fn require_preview(cache: &PreviewCache<FileStore>) -> Result<PreviewSnapshot> {
    cache.load().ok_or_else(|| {
        SheetviewError::cache("no preview cached. Run 'sheetview load <file>' first")
    })
}

/// Import a spreadsheet and cache its preview
fn load_command(workspace_path: Option<&Path>, input: &str) -> Result<()> {
    let mut cache = open_cache(workspace_path)?;

    let mut loader = SheetLoader::new();
    let snapshot = loader.load_path(Path::new(input))?;

    // The previous preview is only replaced once the load has fully
    // succeeded
    cache.save(&snapshot)?;

    PrettyPrinter::print_load_summary(&snapshot);
    Ok(())
}

/// Display the cached preview
fn show_command(workspace_path: Option<&Path>, limit: usize, format: &str) -> Result<()> {
    let output_format =
        OutputFormat::parse(format).map_err(|e| SheetviewError::invalid_input(e))?;

    let cache = open_cache(workspace_path)?;
    let snapshot = require_preview(&cache)?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_preview(&snapshot, limit),
        OutputFormat::Json => println!("{}", JsonFormatter::format_preview(&snapshot)?),
    }

    Ok(())
}

/// Filter the cached preview's rows by a search term
fn search_command(workspace_path: Option<&Path>, term: &str, limit: usize) -> Result<()> {
    let cache = open_cache(workspace_path)?;
    let snapshot = require_preview(&cache)?;

    let matches = snapshot.table.filter(term);
    PrettyPrinter::print_search_results(term, &snapshot.table.headers, &matches, limit);

    Ok(())
}

/// Export the cached preview to a file
fn export_command(
    workspace_path: Option<&Path>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let export_format =
        ExportFormat::parse(format).map_err(|e| SheetviewError::invalid_input(e))?;

    let cache = open_cache(workspace_path)?;
    let snapshot = require_preview(&cache)?;

    let payload = match export_format {
        ExportFormat::Csv => export::export_csv(&snapshot.file_info, &snapshot.table)?,
        ExportFormat::Json => export::export_json(&snapshot.file_info, &snapshot.table)?,
    };

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&payload.filename));

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, &payload.bytes)?;

    println!(
        "💾 Exported {} rows to: {}",
        snapshot.table.row_count(),
        output_path.display()
    );
    println!("└─ Content type: {}", payload.mime_type);

    Ok(())
}

/// Delete the cached preview
fn clear_command(workspace_path: Option<&Path>) -> Result<()> {
    let mut cache = open_cache(workspace_path)?;
    cache.clear()?;

    println!("🗑️  Cleared cached preview.");
    Ok(())
}

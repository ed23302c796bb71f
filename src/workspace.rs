//! Workspace management for sheetview state

use crate::error::{Result, SheetviewError};
use std::fs;
use std::path::{Path, PathBuf};

/// Manages the .sheetview workspace directory
#[derive(Debug, Clone)]
pub struct SheetviewWorkspace {
    /// Project root directory (where .sheetview/ lives)
    pub root: PathBuf,
    /// .sheetview/ directory path
    pub sheetview_dir: PathBuf,
}

impl SheetviewWorkspace {
    /// Find existing workspace or create a new one
    pub fn find_or_create(start_dir: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let start = start_dir.unwrap_or(&current_dir);

        if let Some(workspace) = Self::find_existing(start) {
            return Ok(workspace);
        }

        Self::create_new(start.to_path_buf())
    }

    /// Find an existing .sheetview workspace by walking up the directory tree
    fn find_existing(start_dir: &Path) -> Option<Self> {
        let mut current = start_dir;

        loop {
            let dir = current.join(".sheetview");
            if dir.exists() && dir.is_dir() {
                return Some(Self::from_root(current.to_path_buf()));
            }

            // A .git directory marks the project root; don't search past it
            if current.join(".git").exists() {
                break;
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        None
    }

    /// Create a new workspace in the specified root directory
    pub fn create_new(root: PathBuf) -> Result<Self> {
        let workspace = Self::from_root(root);

        fs::create_dir_all(&workspace.sheetview_dir).map_err(|e| {
            SheetviewError::workspace(format!(
                "failed to create {}: {}",
                workspace.sheetview_dir.display(),
                e
            ))
        })?;
        workspace.create_config()?;
        workspace.ensure_gitignore()?;

        log::info!("Created sheetview workspace at: {}", workspace.root.display());

        Ok(workspace)
    }

    /// Create workspace from root directory path
    pub fn from_root(root: PathBuf) -> Self {
        let sheetview_dir = root.join(".sheetview");
        Self {
            root,
            sheetview_dir,
        }
    }

    /// Directory backing the key-value store
    pub fn store_dir(&self) -> PathBuf {
        self.sheetview_dir.clone()
    }

    /// Create initial configuration file
    fn create_config(&self) -> Result<()> {
        let config_path = self.sheetview_dir.join("config.json");

        if config_path.exists() {
            return Ok(());
        }

        let config = serde_json::json!({
            "version": crate::FORMAT_VERSION,
            "created": chrono::Utc::now(),
            "preview_row_cap": crate::PREVIEW_ROW_CAP,
        });

        fs::write(config_path, serde_json::to_string_pretty(&config)?)?;
        Ok(())
    }

    /// Ensure .gitignore contains the workspace entry
    pub fn ensure_gitignore(&self) -> Result<()> {
        let gitignore_path = self.root.join(".gitignore");
        let sheetview_ignore = "# Ignore cached spreadsheet previews\n.sheetview/\n";

        if gitignore_path.exists() {
            let content = fs::read_to_string(&gitignore_path)?;
            if !content.contains(".sheetview/") {
                let new_content = if content.ends_with('\n') {
                    format!("{}\n{}", content, sheetview_ignore)
                } else {
                    format!("{}\n\n{}", content, sheetview_ignore)
                };
                fs::write(gitignore_path, new_content)?;
                log::info!("Updated .gitignore with sheetview entries");
            }
        } else {
            fs::write(gitignore_path, sheetview_ignore)?;
            log::info!("Created .gitignore with sheetview entries");
        }

        Ok(())
    }
}

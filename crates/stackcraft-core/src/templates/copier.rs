//! Template tree copying
//!
//! The tree is copied into a hidden staging directory beside the target and renamed into
//! place once every file is written, so a failed copy never leaves a half-built project.

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy the whole template tree to `target`, returning the copied files relative to it
///
/// `target` must not exist; it is created by the final rename.
pub fn materialize(template_dir: &Path, target: &Path) -> Result<Vec<PathBuf>> {
    if target.exists() {
        return Err(ScaffoldError::TargetExists {
            path: target.to_path_buf(),
        }
        .into());
    }

    if !template_dir.is_dir() {
        anyhow::bail!("Template path does not exist: {}", template_dir.display());
    }

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    // Staging lives in the same parent so the rename never crosses filesystems
    let staging = tempfile::Builder::new()
        .prefix(".stackcraft-staging-")
        .tempdir_in(parent)
        .with_context(|| format!("Failed to create staging directory in {}", parent.display()))?;

    let copied = copy_tree(template_dir, staging.path())?;

    fs::rename(staging.path(), target).with_context(|| {
        format!(
            "Failed to move staged project into {}",
            target.display()
        )
    })?;

    tracing::debug!(
        files = copied.len(),
        project = %target.display(),
        "materialized template"
    );

    Ok(copied)
}

/// Recursively copy `src` into `dest`, returning the copied files relative to `src`
pub fn copy_tree(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read template directory {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let dest_path = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("Failed to create directory: {}", dest_path.display()))?;
        } else {
            copy_file(entry.path(), &dest_path)?;
            copied.push(relative.to_path_buf());
        }
    }

    Ok(copied)
}

/// Copy one file, creating the destination's parent directories
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(src, dest).with_context(|| {
        format!(
            "Error copying files: {} -> {}",
            src.display(),
            dest.display()
        )
    })?;
    Ok(())
}

//! Template resolution for a framework/language pair
//!
//! Local sources resolve directly inside the template directory. Remote sources are
//! shallow-cloned into a fresh scratch directory first; the scratch directory is owned by
//! the returned [`ResolvedTemplate`] and removed when it is dropped, whichever way the run
//! ends.

use super::source::TemplateSource;
use crate::error::ScaffoldError;
use crate::options::{Framework, Language};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use url::Url;

/// Directory holding the ORM extras, next to the framework directories
pub const EXTRAS_DIR: &str = "prisma";

/// Directory inside the template repository that holds the template tree
pub const REMOTE_TEMPLATES_DIR: &str = "templates";

/// A template located on disk, ready to be copied
#[derive(Debug)]
pub struct ResolvedTemplate {
    templates_root: PathBuf,
    template_dir: PathBuf,
    scratch: Option<TempDir>,
}

impl ResolvedTemplate {
    /// The framework/language template tree
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// The ORM extras subtree (may not exist)
    pub fn extras_dir(&self) -> PathBuf {
        self.templates_root.join(EXTRAS_DIR)
    }

    /// Scratch directory holding a cloned repository, for remote sources
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    /// Remove the scratch directory now, reporting any failure
    pub fn cleanup(self) -> Result<()> {
        if let Some(scratch) = self.scratch {
            let path = scratch.path().to_path_buf();
            scratch
                .close()
                .with_context(|| format!("Failed to remove scratch directory {}", path.display()))?;
            tracing::debug!(path = %path.display(), "removed scratch directory");
        }
        Ok(())
    }
}

/// Locate the template for `framework`/`language`, cloning the repository if needed
pub async fn resolve(
    source: &TemplateSource,
    framework: Framework,
    language: Language,
) -> Result<ResolvedTemplate> {
    let (templates_root, scratch) = checkout(source).await?;
    resolve_in_root(templates_root, scratch, framework, language)
}

/// Make the template tree available on disk
///
/// Returns the directory holding `<framework>/<language>` trees and, for remote sources,
/// the scratch directory guard that keeps the clone alive.
pub async fn checkout(source: &TemplateSource) -> Result<(PathBuf, Option<TempDir>)> {
    match source {
        TemplateSource::Local(dir) => Ok((dir.clone(), None)),
        TemplateSource::Remote(url) => {
            let scratch = tempfile::Builder::new()
                .prefix("stackcraft-")
                .tempdir()
                .context("Failed to create scratch directory")?;
            let clone_dir = scratch.path().join("repo");
            clone_repository(url, &clone_dir).await?;
            Ok((clone_dir.join(REMOTE_TEMPLATES_DIR), Some(scratch)))
        }
    }
}

fn resolve_in_root(
    templates_root: PathBuf,
    scratch: Option<TempDir>,
    framework: Framework,
    language: Language,
) -> Result<ResolvedTemplate> {
    let template_dir = templates_root
        .join(framework.dir_name())
        .join(language.dir_name());

    if !template_dir.is_dir() {
        return Err(ScaffoldError::TemplateNotFound {
            framework,
            language,
            path: template_dir,
        }
        .into());
    }

    tracing::debug!(path = %template_dir.display(), "resolved template");

    Ok(ResolvedTemplate {
        templates_root,
        template_dir,
        scratch,
    })
}

/// Shallow-clone `url` into `dest`
pub async fn clone_repository(url: &Url, dest: &Path) -> Result<()> {
    tracing::debug!(%url, dest = %dest.display(), "cloning template repository");

    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet"])
        .arg(url.as_str())
        .arg(dest)
        .output()
        .await
        .map_err(|e| ScaffoldError::CloneFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ScaffoldError::CloneFailed {
            url: url.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(())
}

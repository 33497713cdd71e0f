//! Error and warning types for scaffolding
//!
//! Fatal conditions are [`ScaffoldError`] values carried inside `anyhow::Error`, so callers
//! can `downcast_ref` when they need to tell them apart. Advisory conditions never abort the
//! workflow; they are collected as [`Warning`] values and shown once the project exists.

use crate::options::{Framework, Language};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scaffolding errors
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No template directory for the chosen framework/language pair
    #[error("Template not found for {framework} ({language}): {}", path.display())]
    TemplateNotFound {
        framework: Framework,
        language: Language,
        path: PathBuf,
    },

    /// The ORM extras subtree is missing from the template source
    #[error("Prisma template path does not exist: {}", path.display())]
    ExtrasNotFound { path: PathBuf },

    /// The project directory is already on disk
    #[error("Project directory already exists: {}", path.display())]
    TargetExists { path: PathBuf },

    /// The generated project has no package.json
    #[error("package.json not found in {}", dir.display())]
    ManifestMissing { dir: PathBuf },

    /// package.json does not hold a JSON object
    #[error("package.json at {} is not a JSON object", path.display())]
    ManifestInvalid { path: PathBuf },

    /// Shallow clone of the template repository failed
    #[error("Failed to clone template repository {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// An external command exited unsuccessfully or could not be spawned
    #[error("Command `{command}` failed with exit code {code:?}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A framework the running product does not offer
    #[error("Framework '{framework}' is not available (choose from: {available})")]
    UnsupportedFramework {
        framework: Framework,
        available: String,
    },
}

/// Non-fatal conditions reported after the project is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An optional extras file is absent from the template source
    MissingExtra { file: String, dir: PathBuf },

    /// A file to be edited for the database choice is absent from the project
    MissingTarget { path: PathBuf },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingExtra { file, dir } => {
                write!(f, "{} not found in {}", file, dir.display())
            }
            Warning::MissingTarget { path } => write!(f, "{} not found", path.display()),
        }
    }
}

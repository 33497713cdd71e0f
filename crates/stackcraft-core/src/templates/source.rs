//! Where templates come from: a git repository or a local directory

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Template source - either a remote git repository or a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create the default template source for a product
    ///
    /// The product's environment variable overrides the repository URL (remote products)
    /// or the bundled directory (local products).
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let env_override = std::env::var(config.template_env())
            .ok()
            .filter(|value| !value.trim().is_empty());

        match config.default_template_repo() {
            Some(default_repo) => {
                let url_str = env_override.unwrap_or_else(|| default_repo.to_string());
                let url = Url::parse(&url_str)
                    .with_context(|| format!("Invalid template repository URL: {}", url_str))?;
                Ok(Self::Remote(url))
            }
            None => {
                let dir = env_override
                    .map(PathBuf::from)
                    .or_else(|| config.bundled_template_dir())
                    .with_context(|| {
                        format!(
                            "No template directory configured (set {} or pass --template-dir)",
                            config.template_env()
                        )
                    })?;
                Ok(Self::Local(dir))
            }
        }
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Whether resolving this source needs `git`
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

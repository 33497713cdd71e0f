//! Template resolution, copying, and ORM extras
//!
//! This module provides:
//! - Template sources (remote git repository or local directory)
//! - Resolution of a framework/language pair to a directory on disk
//! - All-or-nothing copying of the template tree into the new project
//! - Prisma extras and their database substitutions

pub mod copier;
pub mod extras;
pub mod resolver;
pub mod source;

use crate::options::{Framework, Language};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub use copier::materialize;
pub use extras::{apply_orm_extras, configure_database};
pub use resolver::{resolve, ResolvedTemplate};
pub use source::TemplateSource;

/// Availability of one framework/language template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub framework: Framework,
    pub language: Language,
    pub available: bool,
}

/// Check which of `frameworks` have templates under `templates_root`
pub fn scan_templates(templates_root: &Path, frameworks: &[Framework]) -> Vec<TemplateEntry> {
    frameworks
        .iter()
        .flat_map(|&framework| {
            Language::ALL.iter().map(move |&language| TemplateEntry {
                framework,
                language,
                available: templates_root
                    .join(framework.dir_name())
                    .join(language.dir_name())
                    .is_dir(),
            })
        })
        .collect()
}

/// Print the templates a source provides for the given frameworks
pub async fn list_templates(source: &TemplateSource, frameworks: &[Framework]) -> Result<()> {
    println!("{}", format!("Templates in {}", source).cyan().bold());
    println!();

    let (templates_root, scratch) = resolver::checkout(source).await?;

    if !templates_root.exists() {
        anyhow::bail!("Template directory not found: {}", templates_root.display());
    }

    let entries = scan_templates(&templates_root, frameworks);
    for entry in &entries {
        let status = if entry.available {
            "available".green()
        } else {
            "missing".red()
        };
        println!(
            "  {} {:<8} {:<11} {}",
            "->".blue(),
            entry.framework.dir_name(),
            entry.language.dir_name(),
            status
        );
    }

    let extras = if templates_root.join(resolver::EXTRAS_DIR).is_dir() {
        "available".green()
    } else {
        "missing".yellow()
    };
    println!("  {} {:<20} {}", "->".blue(), "prisma extras", extras);

    let available = entries.iter().filter(|e| e.available).count();
    println!();
    println!(
        "{} {} of {} template(s)",
        "Found".green().bold(),
        available,
        entries.len()
    );

    if let Some(scratch) = scratch {
        scratch.close()?;
    }

    Ok(())
}

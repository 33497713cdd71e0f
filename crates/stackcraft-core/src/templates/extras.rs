//! Prisma extras: schema and env files copied into a project, then pointed at a database
//!
//! Extras are best-effort. A missing source or target file becomes a [`Warning`] and the
//! remaining files are still handled.

use super::copier::copy_file;
use crate::error::{ScaffoldError, Warning};
use crate::options::Database;
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// A file from the extras directory and where it lands in the project
#[derive(Debug, Clone, Copy)]
pub struct ExtraFile {
    pub source: &'static str,
    pub dest: &'static str,
}

/// Prisma schema location inside a project
pub const SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Env files carrying `DATABASE_URL`
pub const ENV_FILES: &[&str] = &[".env", ".env.example"];

pub const ORM_EXTRAS: &[ExtraFile] = &[
    ExtraFile {
        source: "schema.prisma",
        dest: SCHEMA_PATH,
    },
    ExtraFile {
        source: ".env",
        dest: ".env",
    },
    ExtraFile {
        source: ".env.example",
        dest: ".env.example",
    },
];

/// Copy the Prisma schema and env files from `extras_dir` into `target`
pub fn apply_orm_extras(extras_dir: &Path, target: &Path) -> Result<Vec<Warning>> {
    if !extras_dir.is_dir() {
        return Err(ScaffoldError::ExtrasNotFound {
            path: extras_dir.to_path_buf(),
        }
        .into());
    }

    let mut warnings = Vec::new();

    for extra in ORM_EXTRAS {
        let src = extras_dir.join(extra.source);
        if !src.is_file() {
            tracing::debug!(file = extra.source, dir = %extras_dir.display(), "extras file missing");
            warnings.push(Warning::MissingExtra {
                file: extra.source.to_string(),
                dir: extras_dir.to_path_buf(),
            });
            continue;
        }

        copy_file(&src, &target.join(extra.dest))
            .context("Error copying Prisma files")?;
        tracing::debug!(file = extra.dest, "copied extras file");
    }

    Ok(warnings)
}

/// Point the copied schema and env files at `database`
pub fn configure_database(target: &Path, database: Database) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();

    let schema_path = target.join(SCHEMA_PATH);
    if schema_path.is_file() {
        rewrite(&schema_path, |content| {
            set_datasource_provider(content, database.provider())
        })?;
    } else {
        tracing::debug!(path = %schema_path.display(), "schema file missing");
        warnings.push(Warning::MissingTarget { path: schema_path });
    }

    for env_file in ENV_FILES {
        let env_path = target.join(env_file);
        if env_path.is_file() {
            rewrite(&env_path, |content| {
                set_database_url(content, database.url_placeholder())
            })?;
        } else {
            tracing::debug!(path = %env_path.display(), "env file missing");
            warnings.push(Warning::MissingTarget { path: env_path });
        }
    }

    Ok(warnings)
}

fn rewrite(path: &Path, edit: impl FnOnce(&str) -> String) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    fs::write(path, edit(&content))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn provider_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"datasource db\s*\{\s*provider\s*=\s*".*""#).expect("valid provider regex")
    })
}

fn database_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"DATABASE_URL\s*=\s*.*").expect("valid DATABASE_URL regex"))
}

/// Replace the provider of the first `datasource db` block
pub fn set_datasource_provider(schema: &str, provider: &str) -> String {
    let replacement = format!("datasource db {{\n  provider = \"{}\"", provider);
    provider_pattern()
        .replace(schema, NoExpand(&replacement))
        .into_owned()
}

/// Replace the first `DATABASE_URL` assignment
pub fn set_database_url(env: &str, url: &str) -> String {
    let replacement = format!("DATABASE_URL=\"{}\"", url);
    database_url_pattern()
        .replace(env, NoExpand(&replacement))
        .into_owned()
}

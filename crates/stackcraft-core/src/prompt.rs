//! The prompt sequence that turns user answers into [`ProjectOptions`]
//!
//! Prompt rendering sits behind the [`Prompter`] trait. The TUI module implements it with
//! cliclack; tests drive the same sequence with scripted answers.

use crate::error::ScaffoldError;
use crate::options::{Database, Framework, Language, ProjectOptions};
use crate::product::ProductConfig;
use crate::DEFAULT_PROJECT_NAME;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Interactive question surface
pub trait Prompter {
    /// Free-text input. `default` is returned for blank input.
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Single choice; returns the index of the chosen item
    fn select(&mut self, message: &str, items: &[&str]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Report a problem with an answer before asking again
    fn error(&mut self, message: &str) -> Result<()>;
}

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Project name; skips the name prompt unless the directory exists
    pub name: Option<String>,

    /// Framework; skips the framework prompt
    pub framework: Option<Framework>,

    /// Language; skips the language prompt
    pub language: Option<Language>,
}

/// Ask every question the product offers and return the collected options
pub fn collect_options<C: ProductConfig, P: Prompter>(
    config: &C,
    prompter: &mut P,
    base_dir: &Path,
    args: &CreateArgs,
) -> Result<ProjectOptions> {
    let name = prompt_project_name(prompter, base_dir, args.name.as_deref())?;

    let framework = match args.framework {
        Some(framework) => check_framework(config, framework)?,
        None => {
            let labels: Vec<&str> = config
                .frameworks()
                .iter()
                .map(|f| f.display_name())
                .collect();
            let idx = prompter.select("Choose the framework", &labels)?;
            pick(config.frameworks(), idx)?
        }
    };

    let language = match args.language {
        Some(language) => language,
        None => {
            let labels: Vec<&str> = Language::ALL.iter().map(|l| l.display_name()).collect();
            let idx = prompter.select("Choose the language", &labels)?;
            pick(Language::ALL, idx)?
        }
    };

    let use_prisma = prompter.confirm("Do you want to include Prisma?", false)?;

    let database = if use_prisma && config.offers_database_choice() {
        let labels: Vec<&str> = Database::ALL.iter().map(|d| d.display_name()).collect();
        let idx = prompter.select("Choose the database", &labels)?;
        Some(pick(Database::ALL, idx)?)
    } else {
        None
    };

    let run_install = prompter.confirm(
        &format!(
            "Do you want to run '{} install' after setup?",
            config.package_manager()
        ),
        true,
    )?;

    let init_git = if config.offers_git_init() {
        prompter.confirm("Do you want to initialize a git repository?", false)?
    } else {
        false
    };

    let options = ProjectOptions {
        name,
        framework,
        language,
        use_prisma,
        database,
        run_install,
        init_git,
    };
    tracing::debug!(?options, "collected project options");

    Ok(options)
}

/// Ask for a project name until it names a directory that does not exist yet
fn prompt_project_name<P: Prompter>(
    prompter: &mut P,
    base_dir: &Path,
    preset: Option<&str>,
) -> Result<String> {
    let mut candidate = preset.map(str::to_string);

    loop {
        let answer = match candidate.take() {
            Some(name) => name,
            None => prompter.input("Enter your project name:", DEFAULT_PROJECT_NAME)?,
        };

        let trimmed = answer.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            trimmed
        };

        if base_dir.join(name).exists() {
            tracing::debug!(name, "project directory already exists");
            prompter.error(&format!(
                "The project name '{}' already exists. Please enter a different name.",
                name
            ))?;
            continue;
        }

        return Ok(name.to_string());
    }
}

fn check_framework<C: ProductConfig>(config: &C, framework: Framework) -> Result<Framework> {
    if config.frameworks().contains(&framework) {
        return Ok(framework);
    }

    let available = config
        .frameworks()
        .iter()
        .map(|f| f.dir_name())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ScaffoldError::UnsupportedFramework {
        framework,
        available,
    }
    .into())
}

fn pick<T: Copy>(items: &[T], idx: usize) -> Result<T> {
    items
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow!("Invalid selection: {}", idx))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Prompter answering from queues and recording what was asked
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        inputs: VecDeque<String>,
        selections: VecDeque<usize>,
        confirmations: VecDeque<bool>,
        pub asked: Vec<String>,
        pub errors: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn inputs(mut self, answers: &[&str]) -> Self {
            self.inputs.extend(answers.iter().map(|s| s.to_string()));
            self
        }

        pub fn selections(mut self, answers: &[usize]) -> Self {
            self.selections.extend(answers.iter().copied());
            self
        }

        pub fn confirmations(mut self, answers: &[bool]) -> Self {
            self.confirmations.extend(answers.iter().copied());
            self
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, message: &str, default: &str) -> Result<String> {
            self.asked.push(message.to_string());
            let answer = self
                .inputs
                .pop_front()
                .ok_or_else(|| anyhow!("No scripted input for '{}'", message))?;
            Ok(if answer.is_empty() {
                default.to_string()
            } else {
                answer
            })
        }

        fn select(&mut self, message: &str, _items: &[&str]) -> Result<usize> {
            self.asked.push(message.to_string());
            self.selections
                .pop_front()
                .ok_or_else(|| anyhow!("No scripted selection for '{}'", message))
        }

        fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
            self.asked.push(message.to_string());
            self.confirmations
                .pop_front()
                .ok_or_else(|| anyhow!("No scripted confirmation for '{}'", message))
        }

        fn error(&mut self, message: &str) -> Result<()> {
            self.errors.push(message.to_string());
            Ok(())
        }
    }
}

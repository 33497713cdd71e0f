//! Charm-style CLI prompts using cliclack

use crate::options::ProjectOptions;
use crate::product::ProductConfig;
use crate::prompt::{self, CreateArgs, Prompter};
use crate::setup::SystemRunner;
use crate::templates::TemplateSource;
use crate::toolchain;
use crate::workflow::{self, ScaffoldReport};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// [`Prompter`] backed by cliclack widgets
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let value: String = cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .interact()?;
        Ok(value)
    }

    fn select(&mut self, message: &str, items: &[&str]) -> Result<usize> {
        // Use indices so callers map back to their own types
        let mut select = cliclack::select(message);
        for (idx, label) in items.iter().enumerate() {
            select = select.item(idx, *label, "");
        }
        Ok(select.interact()?)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(cliclack::confirm(message).initial_value(default).interact()?)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        cliclack::log::error(message)?;
        Ok(())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Setup template source
    let source = setup_source(config, &args.template_dir)?;

    // Step 2: Ask the questions
    let base_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let options = prompt::collect_options(config, &mut CliclackPrompter, &base_dir, &args)?;

    // Step 3: Make sure git / the package manager are there before touching the disk
    check_tools(config, &source, &options)?;

    // Step 4: Create project files
    let mut report = create_project(config, &source, &options, &base_dir).await?;

    // Step 5: Post-setup commands
    run_post_setup(config, &options, &mut report).await?;

    // Step 6: Show next steps
    print_next_steps(config, &options, &report.target)?;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    Ok(())
}

fn setup_source<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateSource> {
    let source = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateSource::local(path.clone())
        }
        None => {
            let source = TemplateSource::from_config(config)?;
            if source.is_remote() {
                cliclack::log::info(format!("Using templates from {}", source))?;
            }
            source
        }
    };

    Ok(source)
}

fn check_tools<C: ProductConfig>(
    config: &C,
    source: &TemplateSource,
    options: &ProjectOptions,
) -> Result<()> {
    let needed = toolchain::required_tools(source, options, config.package_manager());
    if needed.is_empty() {
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match toolchain::check_tools(&needed) {
        Ok(tools) => {
            let info: Vec<String> = tools
                .iter()
                .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected tools: {}", info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

async fn create_project<C: ProductConfig>(
    config: &C,
    source: &TemplateSource,
    options: &ProjectOptions,
    base_dir: &Path,
) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    if source.is_remote() {
        spinner.start("Fetching template and creating project...");
    } else {
        spinner.start("Creating project...");
    }

    let report = match workflow::create_project(config, source, options, base_dir).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Project creation failed");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Created {} {} project with {} files in {}",
        options.framework,
        options.language,
        report.copied_files.len(),
        report.target.display()
    ));

    for warning in &report.warnings {
        cliclack::log::warning(warning.to_string())?;
    }
    if let Some(database) = options.effective_database() {
        cliclack::log::success(format!("Prisma configured for {}", database))?;
    } else if options.use_prisma {
        cliclack::log::success("Prisma files added")?;
    }

    Ok(report)
}

async fn run_post_setup<C: ProductConfig>(
    config: &C,
    options: &ProjectOptions,
    report: &mut ScaffoldReport,
) -> Result<()> {
    if workflow::post_setup_commands(config, options).is_empty() {
        return Ok(());
    }

    workflow::run_post_setup_with(config, options, report, &SystemRunner, |command| {
        cliclack::log::step(format!("Running {}", command))?;
        Ok(())
    })
    .await?;
    cliclack::log::success("Setup commands finished")?;

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    options: &ProjectOptions,
    project_dir: &Path,
) -> Result<()> {
    let steps = config.next_steps(&options.name, options.run_install);

    println!();
    println!("  Project setup is complete. Your project is ready at {}", project_dir.display());
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

//! Stack Craft Lite - Express and Hono scaffolding from bundled templates

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use stackcraft_core::product::PRISMA_DEPENDENCIES;
use stackcraft_core::templates::{self, TemplateSource};
use stackcraft_core::tui::CreateArgs;
use stackcraft_core::{Framework, Language, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Templates directory shipped in the repository
const SOURCE_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Stack Craft Lite product configuration
#[derive(Clone)]
pub struct LiteConfig;

impl ProductConfig for LiteConfig {
    fn name(&self) -> &'static str {
        "stackcraft-lite"
    }

    fn display_name(&self) -> &'static str {
        "Stack Craft Lite"
    }

    fn frameworks(&self) -> &'static [Framework] {
        &[Framework::Express, Framework::Hono]
    }

    fn default_template_repo(&self) -> Option<&'static str> {
        None
    }

    fn bundled_template_dir(&self) -> Option<PathBuf> {
        // An installed binary looks for templates/ next to itself first
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));

        first_existing_dir(beside_exe.into_iter().chain([PathBuf::from(SOURCE_TEMPLATES)]))
    }

    fn template_env(&self) -> &'static str {
        "STACKCRAFT_TEMPLATE_DIR"
    }

    fn offers_database_choice(&self) -> bool {
        false
    }

    fn offers_git_init(&self) -> bool {
        false
    }

    fn orm_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        PRISMA_DEPENDENCIES
    }

    fn next_steps(&self, project_name: &str, installed: bool) -> Vec<String> {
        let mut steps = vec![format!("cd {}", project_name)];
        if !installed {
            steps.push(format!("{} install", self.package_manager()));
        }
        steps.push(format!("{} start", self.package_manager()));
        steps
    }

    fn cli_description(&self) -> &'static str {
        "Minimal CLI for scaffolding Express and Hono projects"
    }
}

/// First candidate that is a directory; `None` lets the caller ask for `STACKCRAFT_TEMPLATE_DIR`
fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|dir| dir.is_dir())
}

#[derive(Parser, Debug)]
#[command(name = "stackcraft-lite")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print diagnostic logs to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// List the framework/language templates available
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Framework to use (express or hono)
    #[arg(short, long, value_enum)]
    pub framework: Option<Framework>,

    /// Language to use (typescript/ts or javascript/js)
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            name: args.name,
            framework: args.framework,
            language: args.language,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Local directory containing templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

async fn list(config: &LiteConfig, args: TemplatesArgs) -> Result<()> {
    let source = match args.template_dir {
        Some(dir) => TemplateSource::local(dir),
        None => TemplateSource::from_config(config)?,
    };
    templates::list_templates(&source, config.frameworks()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = LiteConfig;
    let matches = Args::command().about(config.cli_description()).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    stackcraft_core::logging::init(args.debug);

    let result = match args.command {
        Some(Command::Create(create_args)) => stackcraft_core::run(&config, create_args.into()).await,
        Some(Command::Templates(list_args)) => list(&config, list_args).await,
        None => stackcraft_core::run(&config, CreateArgs::default()).await,
    };

    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

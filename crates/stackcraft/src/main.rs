//! Stack Craft CLI - Project scaffolding for Node.js web servers

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use stackcraft_core::templates::{self, TemplateSource};
use stackcraft_core::tui::CreateArgs;
use stackcraft_core::{Framework, Language, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Stack Craft product configuration
#[derive(Clone)]
pub struct StackCraftConfig;

/// Prisma packages plus the server stack the templates build on
const ORM_DEPENDENCIES: &[(&str, &str)] = &[
    ("prisma", "^5.16.2"),
    ("@prisma/client", "^5.16.2"),
    ("dotenv", "^16.4.5"),
    ("express", "^4.18.2"),
    ("cors", "^2.8.5"),
    ("axios", "^1.2.0"),
];

impl ProductConfig for StackCraftConfig {
    fn name(&self) -> &'static str {
        "stackcraft"
    }

    fn display_name(&self) -> &'static str {
        "Stack Craft"
    }

    fn frameworks(&self) -> &'static [Framework] {
        Framework::ALL
    }

    fn default_template_repo(&self) -> Option<&'static str> {
        Some("https://github.com/dev-rio/stack-craft-templates.git")
    }

    fn template_env(&self) -> &'static str {
        "STACKCRAFT_TEMPLATE_URL"
    }

    fn offers_database_choice(&self) -> bool {
        true
    }

    fn offers_git_init(&self) -> bool {
        true
    }

    fn orm_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        ORM_DEPENDENCIES
    }

    fn next_steps(&self, project_name: &str, installed: bool) -> Vec<String> {
        let mut steps = vec![format!("cd {}", project_name)];
        if !installed {
            steps.push(format!("{} install", self.package_manager()));
        }
        steps.push(format!("{} run dev", self.package_manager()));
        steps
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Node.js web server projects"
    }
}

#[derive(Parser, Debug)]
#[command(name = "stackcraft")]
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
    /// Local directory to use for templates instead of cloning the template repository
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Framework to use
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

async fn list(config: &StackCraftConfig, args: TemplatesArgs) -> Result<()> {
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

    let config = StackCraftConfig;
    let matches = Args::command().about(config.cli_description()).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    stackcraft_core::logging::init(args.debug);

    let result = match args.command {
        Some(Command::Create(create_args)) => stackcraft_core::run(&config, create_args.into()).await,
        Some(Command::Templates(list_args)) => list(&config, list_args).await,
        // No subcommand provided, default to create behavior (interactive mode)
        None => stackcraft_core::run(&config, CreateArgs::default()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

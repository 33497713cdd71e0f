//! Stackcraft Core - Shared library for web server project scaffolding
//!
//! This library provides the core functionality for creating a new project from a
//! framework/language template. It is used by the `stackcraft` and `stackcraft-lite`
//! binaries, which share the same workflow but differ in the frameworks they offer
//! and in where their templates come from.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template resolution, copying, ORM extras,
//!   `package.json` patching, post-setup commands
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, the `Prompter` seam and
//!   [`workflow::scaffold`] for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stackcraft_core::{workflow, ProjectOptions, SystemRunner, TemplateSource};
//!
//! let source = TemplateSource::local("templates".into());
//! let report = workflow::scaffold(&MyConfig, &source, &options, &base_dir, &SystemRunner).await?;
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod error;
pub mod logging;
pub mod manifest;
pub mod options;
pub mod product;
pub mod prompt;
pub mod setup;
pub mod templates;
pub mod toolchain;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ScaffoldError, Warning};
pub use options::{Database, Framework, Language, ProjectOptions};
pub use product::ProductConfig;
pub use prompt::{CreateArgs, Prompter};
pub use setup::{CommandRunner, SetupCommand, SystemRunner};
pub use templates::{materialize, ResolvedTemplate, TemplateSource};
pub use workflow::ScaffoldReport;

#[cfg(feature = "tui")]
pub use tui::run;

/// Default project name offered at the name prompt
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

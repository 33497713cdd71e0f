//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product (stackcraft, stackcraft-lite) must
//! implement to configure the scaffolding behavior for their specific needs.

use crate::options::Framework;
use std::path::PathBuf;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Which frameworks are offered
/// - Where templates come from (remote repository or bundled directory)
/// - Which optional prompts are asked
/// - The packages added when Prisma is selected
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Frameworks offered at the framework prompt
    fn frameworks(&self) -> &'static [Framework];

    /// Git URL of the template repository. `None` means templates are bundled locally.
    fn default_template_repo(&self) -> Option<&'static str>;

    /// Directory of bundled templates, used when there is no template repository
    fn bundled_template_dir(&self) -> Option<PathBuf> {
        None
    }

    /// Environment variable overriding the template repository URL or directory
    fn template_env(&self) -> &'static str;

    /// Whether the database kind is asked for after choosing Prisma
    fn offers_database_choice(&self) -> bool;

    /// Whether the git initialization prompt is asked
    fn offers_git_init(&self) -> bool;

    /// Dependencies merged into package.json when Prisma is selected
    fn orm_dependencies(&self) -> &'static [(&'static str, &'static str)];

    /// Package manager used for the install step
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str, installed: bool) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;
}

/// Packages every product adds alongside a Prisma schema
pub const PRISMA_DEPENDENCIES: &[(&str, &str)] = &[
    ("prisma", "^5.16.2"),
    ("@prisma/client", "^5.16.2"),
    ("dotenv", "^16.4.5"),
];

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Product used across the unit tests: every framework, every optional prompt
    #[derive(Clone)]
    pub struct TestConfig {
        pub frameworks: &'static [Framework],
        pub database_choice: bool,
        pub git_init: bool,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                frameworks: Framework::ALL,
                database_choice: true,
                git_init: true,
            }
        }
    }

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn frameworks(&self) -> &'static [Framework] {
            self.frameworks
        }

        fn default_template_repo(&self) -> Option<&'static str> {
            None
        }

        fn template_env(&self) -> &'static str {
            "STACKCRAFT_TEST_TEMPLATE_DIR"
        }

        fn offers_database_choice(&self) -> bool {
            self.database_choice
        }

        fn offers_git_init(&self) -> bool {
            self.git_init
        }

        fn orm_dependencies(&self) -> &'static [(&'static str, &'static str)] {
            PRISMA_DEPENDENCIES
        }

        fn next_steps(&self, project_name: &str, _installed: bool) -> Vec<String> {
            vec![format!("cd {}", project_name)]
        }

        fn cli_description(&self) -> &'static str {
            "test product"
        }
    }
}

//! Detection of the external tools the workflow shells out to

use crate::options::ProjectOptions;
use crate::templates::TemplateSource;
use anyhow::Result;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if `program` is available by running `program --version`
pub fn check_tool(program: &str) -> ToolInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name: program.to_string(),
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}

/// Programs a run with these options will invoke
pub fn required_tools(
    source: &TemplateSource,
    options: &ProjectOptions,
    package_manager: &str,
) -> Vec<String> {
    let mut tools = Vec::new();
    if source.is_remote() || options.init_git {
        tools.push("git".to_string());
    }
    if options.run_install {
        tools.push(package_manager.to_string());
    }
    tools
}

/// Check every tool, failing with the full list of missing ones
pub fn check_tools(programs: &[String]) -> Result<Vec<ToolInfo>> {
    let results: Vec<ToolInfo> = programs.iter().map(|p| check_tool(p)).collect();

    let missing: Vec<&str> = results
        .iter()
        .filter(|t| !t.available)
        .map(|t| t.name.as_str())
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

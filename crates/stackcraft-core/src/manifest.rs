//! package.json patching for the Prisma option
//!
//! The manifest is edited as an order-preserving JSON object so fields the template
//! authored stay where they were.

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Manifest file name inside a project
pub const MANIFEST_FILE: &str = "package.json";

/// Scripts added ahead of the template's own scripts (which win on conflict)
pub const ORM_SCRIPTS: &[(&str, &str)] = &[
    ("db:generate", "prisma generate"),
    ("db:migrate", "prisma migrate deploy"),
    ("db:push", "prisma db push"),
    ("db:studio", "prisma studio"),
];

/// Script applied last; always overrides an existing entry
pub const POSTINSTALL_SCRIPT: (&str, &str) = ("postinstall", "prisma generate");

/// Merge the Prisma dependencies and scripts into `<project_dir>/package.json`
pub fn patch_manifest(project_dir: &Path, dependencies: &[(&str, &str)]) -> Result<()> {
    let path = project_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(ScaffoldError::ManifestMissing {
            dir: project_dir.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Error updating package.json: invalid JSON in {}", path.display()))?;

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::ManifestInvalid { path: path.clone() })?;
    merge_orm_entries(root, dependencies);

    let mut output =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize package.json")?;
    output.push('\n');
    fs::write(&path, output).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), "patched manifest");
    Ok(())
}

/// Apply the dependency and script merge to a parsed manifest
pub fn merge_orm_entries(root: &mut Map<String, Value>, dependencies: &[(&str, &str)]) {
    let mut merged_dependencies = match root.get("dependencies") {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Map::new(),
    };
    for (name, version) in dependencies {
        merged_dependencies.insert(name.to_string(), Value::String(version.to_string()));
    }
    root.insert(
        "dependencies".to_string(),
        Value::Object(merged_dependencies),
    );

    let mut scripts = Map::new();
    for (name, command) in ORM_SCRIPTS {
        scripts.insert(name.to_string(), Value::String(command.to_string()));
    }
    if let Some(Value::Object(existing)) = root.get("scripts") {
        for (name, command) in existing {
            scripts.insert(name.clone(), command.clone());
        }
    }
    let (name, command) = POSTINSTALL_SCRIPT;
    scripts.insert(name.to_string(), Value::String(command.to_string()));
    root.insert("scripts".to_string(), Value::Object(scripts));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::PRISMA_DEPENDENCIES;
    use tempfile::TempDir;

    const PACKAGE_JSON: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "scripts": {
    "dev": "nodemon src/app.ts",
    "db:push": "custom push",
    "postinstall": "echo installed"
  },
  "dependencies": {
    "express": "^4.18.2",
    "dotenv": "^16.0.0"
  },
  "devDependencies": {
    "typescript": "^5.4.5"
  }
}
"#;

    fn project_with_manifest(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), content).unwrap();
        dir
    }

    fn read_manifest(dir: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap()).unwrap()
    }

    #[test]
    fn test_merges_dependencies() {
        let project = project_with_manifest(PACKAGE_JSON);
        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let manifest = read_manifest(project.path());
        let deps = &manifest["dependencies"];
        assert_eq!(deps["express"], "^4.18.2");
        assert_eq!(deps["prisma"], "^5.16.2");
        assert_eq!(deps["@prisma/client"], "^5.16.2");
        // Added entries override same-named existing ones
        assert_eq!(deps["dotenv"], "^16.4.5");
        assert_eq!(manifest["devDependencies"]["typescript"], "^5.4.5");
    }

    #[test]
    fn test_script_precedence_and_order() {
        let project = project_with_manifest(PACKAGE_JSON);
        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let manifest = read_manifest(project.path());
        let scripts = manifest["scripts"].as_object().unwrap();
        let keys: Vec<&str> = scripts.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["db:generate", "db:migrate", "db:push", "db:studio", "dev", "postinstall"]
        );
        assert_eq!(scripts["db:push"], "custom push");
        assert_eq!(scripts["dev"], "nodemon src/app.ts");
        assert_eq!(scripts["postinstall"], "prisma generate");
    }

    #[test]
    fn test_second_application_still_overrides_postinstall() {
        let project = project_with_manifest(PACKAGE_JSON);
        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let mut manifest = read_manifest(project.path());
        manifest["scripts"]["postinstall"] = Value::String("node setup.js".to_string());
        fs::write(
            project.path().join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();

        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let manifest = read_manifest(project.path());
        assert_eq!(manifest["scripts"]["postinstall"], "prisma generate");
        assert_eq!(manifest["scripts"]["db:push"], "custom push");
    }

    #[test]
    fn test_missing_sections_are_created() {
        let project = project_with_manifest(r#"{"name": "bare"}"#);
        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let manifest = read_manifest(project.path());
        assert_eq!(manifest["dependencies"].as_object().unwrap().len(), 3);
        assert_eq!(manifest["scripts"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_output_format_is_stable() {
        let project = project_with_manifest(PACKAGE_JSON);
        patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap();

        let written = fs::read_to_string(project.path().join(MANIFEST_FILE)).unwrap();
        assert!(written.starts_with("{\n  \"name\": \"app\",\n  \"version\": \"1.0.0\",\n  \"scripts\""));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let project = TempDir::new().unwrap();
        let err = patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ManifestMissing { .. })
        ));
    }

    #[test]
    fn test_non_object_manifest_is_fatal() {
        let project = project_with_manifest("[1, 2, 3]");
        let err = patch_manifest(project.path(), PRISMA_DEPENDENCIES).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ManifestInvalid { .. })
        ));
    }
}

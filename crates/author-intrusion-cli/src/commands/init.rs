//! Init command implementation.

use anyhow::{bail, Context, Result};
use author_intrusion_core::PROJECT_FILE_NAME;
use std::path::Path;

const DEFAULT_PROJECT: &str = r#"{
  "analysis": [
    {
      "name": "metadata",
      "plugin": "required-metadata",
      "keys": ["title"]
    },
    {
      "name": "length",
      "plugin": "line-length",
      "max": 100,
      "severity": "warning"
    },
    {
      "name": "whitespace",
      "plugin": "trailing-whitespace"
    },
    {
      "name": "repeats",
      "plugin": "repeated-words",
      "ignore": ["had", "that"]
    }
  ]
}
"#;

/// Runs the init command, writing a starter project file into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let project_path = dir.join(PROJECT_FILE_NAME);

    if project_path.exists() && !force {
        bail!(
            "Project file already exists at {}. Use --force to overwrite.",
            project_path.display()
        );
    }

    std::fs::write(&project_path, DEFAULT_PROJECT)
        .with_context(|| format!("Failed to write {}", project_path.display()))?;

    println!("Created {PROJECT_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {PROJECT_FILE_NAME} to choose analyses");
    println!("  2. Run: author-intrusion lint <FILES>");

    Ok(())
}

//! `generate` command

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crudforge::{Artifact, generate_all};
use tracing::info;

use crate::inspect::load;

/// Generate command implementation
///
/// Writes every artifact under `output`, or lists them when no output
/// directory is configured.
pub fn run(schema_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let schema = load(schema_path)?;
    let artifacts = generate_all(&schema)?;

    let Some(output) = output else {
        for artifact in &artifacts {
            println!("{:<15} {}", artifact.kind, artifact.path);
        }
        return Ok(());
    };

    let written = write_artifacts(&output, &artifacts)?;
    for path in &written {
        println!("✓ {}", path.display());
    }
    println!("\nGenerated {} files in {}", written.len(), output.display());
    Ok(())
}

/// Write each artifact below `root`, creating directories as needed.
/// Existing files are overwritten.
pub fn write_artifacts(root: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(kind = %artifact.kind, path = %path.display(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;

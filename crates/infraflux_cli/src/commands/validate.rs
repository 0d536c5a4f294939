//! Validate command - Check YAML files for structural errors.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};
use walkdir::WalkDir;

use infraflux_render::validate_yaml;

#[derive(Args)]
pub struct ValidateArgs {
    /// File or directory to validate
    path: PathBuf,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// YAML files under `path`, or `path` itself when it is a file.
pub fn collect_yaml_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_yaml(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    if !args.path.exists() {
        anyhow::bail!("Path not found: {:?}", args.path);
    }

    info!("Validating YAML under {:?}", args.path);

    let files = collect_yaml_files(&args.path);
    if files.is_empty() {
        println!("⚠️  No YAML files found");
        return Ok(());
    }

    let mut failed = 0;
    for file in &files {
        let content =
            fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
        match validate_yaml(&content) {
            Ok(()) => debug!("Valid: {:?}", file),
            Err(e) => {
                failed += 1;
                println!("❌ {}: {}", file.display(), e);
            }
        }
    }

    println!();
    println!("Results: {} passed, {} failed", files.len() - failed, failed);

    if failed > 0 {
        anyhow::bail!("YAML validation failed for {} file(s)", failed);
    }

    Ok(())
}

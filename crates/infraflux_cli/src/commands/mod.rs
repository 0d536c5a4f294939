//! CLI command definitions.
//!
//! Each subcommand is a thin layer over `infraflux_render`: it locates
//! inputs, builds explicit options and reports results.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod recipes;
pub mod up;
pub mod validate;

/// InfraFlux - one-command, multi-cloud Kubernetes recipes
#[derive(Parser)]
#[command(name = "infraflux")]
#[command(version, about = "InfraFlux: one-command, multi-cloud Kubernetes recipes")]
#[command(long_about = r#"
InfraFlux renders Cluster API + Talos cluster definitions, addons and
Flux recipe bundles for AWS, Azure, GCP and Proxmox.

COMMANDS:
  up        → Render cluster, addon and recipe manifests under out/<cluster>/
  recipes   → Render Flux Kustomizations for recipe bundles only
  validate  → Check YAML files for structural errors

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Render error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to infraflux config (optional)
    #[arg(short, long, global = true, env = "INFRAFLUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render manifests for a workload cluster (CAPI + Talos, Cilium, Flux recipes)
    Up(up::UpArgs),

    /// Render recipe Kustomizations into a directory
    Recipes(recipes::RecipesArgs),

    /// Validate YAML files
    Validate(validate::ValidateArgs),
}

//! Up command - Render manifests for a workload cluster.
//!
//! Renders only; applying the output with cluster tooling is left to the
//! caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use infraflux_render::{
    parse_recipe_list, render_cluster, ClusterOptions, Provider, ValueOverrides, BASE_RECIPE,
};

use crate::config::CliConfig;

const DEFAULT_PROVIDER: &str = "proxmox";
const DEFAULT_NAME: &str = "infraflux";
const DEFAULT_WORKERS: u32 = 2;
const DEFAULT_K8S_MINOR: &str = "1.30";

#[derive(Args, Debug, Default)]
pub struct UpArgs {
    /// Target provider: aws|azure|gcp|proxmox [default: proxmox]
    #[arg(long, env = "INFRAFLUX_PROVIDER")]
    provider: Option<String>,

    /// Cluster name [default: infraflux]
    #[arg(long, env = "INFRAFLUX_NAME")]
    name: Option<String>,

    /// Cloud region (if applicable)
    #[arg(long, env = "INFRAFLUX_REGION")]
    region: Option<String>,

    /// Number of worker nodes [default: 2]
    #[arg(long, env = "INFRAFLUX_WORKERS")]
    workers: Option<u32>,

    /// Kubernetes minor version [default: 1.30]
    #[arg(long = "k8s", env = "INFRAFLUX_K8S")]
    k8s_minor: Option<String>,

    /// Comma-separated recipe bundles [default: base]
    #[arg(long, env = "INFRAFLUX_RECIPES")]
    recipes: Option<String>,

    /// Fail when a template keeps unresolved ${...} placeholders
    #[arg(long)]
    strict: bool,

    /// Project root containing clusters/ (defaults to . or ..)
    #[arg(long, env = "INFRAFLUX_ROOT")]
    root: Option<PathBuf>,

    /// Print a JSON summary of rendered files
    #[arg(long)]
    json: bool,
}

impl UpArgs {
    /// Merge flags over config file values over defaults.
    fn into_options(self, config: CliConfig) -> Result<ClusterOptions> {
        let provider = self
            .provider
            .or(config.provider)
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
            .parse::<Provider>()?;

        let recipes = match self.recipes {
            Some(csv) => parse_recipe_list(&csv),
            None => config
                .recipes
                .unwrap_or_else(|| vec![BASE_RECIPE.to_string()]),
        };

        let overrides = ValueOverrides {
            cluster_name: Some(
                self.name
                    .or(config.name)
                    .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            ),
            region: self.region.or(config.region),
            k8s_minor: Some(
                self.k8s_minor
                    .or(config.k8s_minor)
                    .unwrap_or_else(|| DEFAULT_K8S_MINOR.to_string()),
            ),
            worker_replicas: Some(self.workers.or(config.workers).unwrap_or(DEFAULT_WORKERS)),
        };

        Ok(ClusterOptions::new(provider.as_str())
            .with_overrides(overrides)
            .with_recipes(recipes)
            .with_strict(self.strict || config.strict.unwrap_or(false)))
    }
}

/// Use `.` when it holds `clusters/`, otherwise `..`.
pub fn find_project_root(explicit: Option<PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(root) = explicit {
        return root;
    }
    if cwd.join("clusters").exists() {
        cwd.to_path_buf()
    } else {
        cwd.join("..")
    }
}

pub async fn execute(args: UpArgs, config_path: Option<&Path>) -> Result<()> {
    let config = CliConfig::load_optional(config_path)?;
    let cwd = std::env::current_dir()?;
    let root = find_project_root(args.root.clone(), &cwd);
    let json = args.json;
    let options = args.into_options(config)?;

    info!("Rendering {} cluster from {:?}", options.provider, root);

    let summary = tokio::task::spawn_blocking(move || render_cluster(&root, &options))
        .await
        .context("Render task failed to complete")?
        .context("Failed to render cluster")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Rendered {} manifest(s) under out/{}",
            summary.file_count(),
            summary.cluster_name
        );
    }

    Ok(())
}

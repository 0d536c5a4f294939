//! Recipes command - Render recipe Kustomizations only.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use infraflux_render::{parse_recipe_list, with_base, RecipeRenderer};

#[derive(Args)]
pub struct RecipesArgs {
    /// Comma-separated recipe bundles
    #[arg(long, default_value = "base", env = "INFRAFLUX_RECIPES")]
    recipes: String,

    /// Output directory
    #[arg(short, long)]
    out: PathBuf,

    /// Do not add the base recipe when it is missing
    #[arg(long)]
    no_base: bool,
}

pub async fn execute(args: RecipesArgs) -> Result<()> {
    let mut recipes = parse_recipe_list(&args.recipes);
    if !args.no_base {
        recipes = with_base(recipes);
    }

    if recipes.is_empty() {
        anyhow::bail!("No recipes given (argument --recipes is empty)");
    }

    info!("Rendering recipes: {}", recipes.join(","));

    let written = RecipeRenderer::new()
        .render(&recipes, &args.out)
        .context("Failed to render recipes")?;

    for path in &written {
        println!("✅ {}", path.display());
    }

    Ok(())
}

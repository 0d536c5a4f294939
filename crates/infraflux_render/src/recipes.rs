//! Flux Kustomization synthesis for recipe bundles.
//!
//! Every recipe other than [`BASE_RECIPE`] depends on the base bundle; the
//! ordering lives in the manifest content, not in write order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RenderError, RenderResult};
use crate::validator::validate_yaml;

/// The foundational recipe every other bundle depends on.
pub const BASE_RECIPE: &str = "base";

/// Renderer for recipe `Kustomization` manifests.
#[derive(Debug, Clone)]
pub struct RecipeRenderer {
    namespace: String,
    source_name: String,
    interval: String,
}

impl Default for RecipeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeRenderer {
    pub fn new() -> Self {
        Self {
            namespace: "flux-system".to_string(),
            source_name: "infraflux".to_string(),
            interval: "10m".to_string(),
        }
    }

    /// Build the manifest text for one recipe.
    pub fn manifest(&self, recipe: &str) -> String {
        let mut content = format!(
            r#"apiVersion: kustomize.toolkit.fluxcd.io/v1
kind: Kustomization
metadata:
  name: {recipe}
  namespace: {ns}
spec:
  interval: {interval}
  path: ./recipes/{recipe}
  prune: true
  sourceRef:
    kind: GitRepository
    name: {source}
    namespace: {ns}
"#,
            recipe = recipe,
            ns = self.namespace,
            interval = self.interval,
            source = self.source_name,
        );

        if recipe != BASE_RECIPE {
            content.push_str(&format!("  dependsOn:\n    - name: {}\n", BASE_RECIPE));
        }

        content
    }

    /// Write `<recipe>.yaml` for every recipe into `out_dir`.
    ///
    /// Duplicate names overwrite the same file.
    pub fn render(&self, recipes: &[String], out_dir: &Path) -> RenderResult<Vec<PathBuf>> {
        info!("Rendering {} recipe(s) to {:?}", recipes.len(), out_dir);

        let mut written = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let content = self.manifest(recipe);
            validate_yaml(&content).map_err(|source| RenderError::Recipe {
                recipe: recipe.clone(),
                source,
            })?;

            fs::create_dir_all(out_dir).map_err(|source| RenderError::Write {
                path: out_dir.to_path_buf(),
                source,
            })?;

            let target = out_dir.join(format!("{}.yaml", recipe));
            fs::write(&target, content).map_err(|source| RenderError::Write {
                path: target.clone(),
                source,
            })?;

            debug!("Rendered recipe: {:?}", target);
            written.push(target);
        }

        Ok(written)
    }
}

/// Split a comma-separated recipe list, dropping blanks.
pub fn parse_recipe_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

/// Prepend the base recipe when the list does not already contain it.
pub fn with_base(mut recipes: Vec<String>) -> Vec<String> {
    if !recipes.iter().any(|r| r == BASE_RECIPE) {
        recipes.insert(0, BASE_RECIPE.to_string());
    }
    recipes
}

//! End-to-end cluster rendering.
//!
//! Expects a project root laid out as:
//!
//! ```text
//! clusters/
//!   <provider>/values.example.yaml
//!   templates/*.yaml
//!   cilium/helmrelease.yaml
//!   gateway/envoy-gateway-helmrelease.yaml
//! ```
//!
//! and writes `out/<cluster>/{cluster,addons/<addon>,recipes}`.

use std::path::{Path, PathBuf};
use std::thread;

use serde::Serialize;
use tracing::info;

use crate::error::{RenderError, RenderResult};
use crate::recipes::{with_base, RecipeRenderer, BASE_RECIPE};
use crate::renderer::TemplateRenderer;
use crate::resolver::{resolve, ResolvedValues};
use crate::values::{ProviderValues, ValueOverrides};

/// Addon name and its template path relative to `clusters/`.
const ADDONS: &[(&str, &str)] = &[
    ("cilium", "cilium/helmrelease.yaml"),
    ("gateway", "gateway/envoy-gateway-helmrelease.yaml"),
];

/// Options for a full cluster render.
#[derive(Debug, Clone)]
pub struct ClusterOptions {
    pub provider: String,
    pub overrides: ValueOverrides,
    pub recipes: Vec<String>,
    pub strict: bool,
}

impl ClusterOptions {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            overrides: ValueOverrides::default(),
            recipes: vec![BASE_RECIPE.to_string()],
            strict: false,
        }
    }

    pub fn with_overrides(mut self, overrides: ValueOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_recipes(mut self, recipes: Vec<String>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Input and output locations under a project root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    cluster_name: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, cluster_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            cluster_name: cluster_name.into(),
        }
    }

    pub fn values_file(root: &Path, provider: &str) -> PathBuf {
        root.join("clusters").join(provider).join("values.example.yaml")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("clusters").join("templates")
    }

    pub fn addon_template(&self, relative: &str) -> PathBuf {
        self.root.join("clusters").join(relative)
    }

    pub fn base_dir(&self) -> PathBuf {
        self.root.join("out").join(&self.cluster_name)
    }

    pub fn cluster_dir(&self) -> PathBuf {
        self.base_dir().join("cluster")
    }

    pub fn addon_dir(&self, addon: &str) -> PathBuf {
        self.base_dir().join("addons").join(addon)
    }

    pub fn recipes_dir(&self) -> PathBuf {
        self.base_dir().join("recipes")
    }
}

/// Files written by a render run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSummary {
    pub cluster_name: String,
    pub provider: String,
    pub output_dir: PathBuf,
    pub cluster: Vec<PathBuf>,
    pub addons: Vec<PathBuf>,
    pub recipes: Vec<PathBuf>,
}

impl RenderSummary {
    pub fn file_count(&self) -> usize {
        self.cluster.len() + self.addons.len() + self.recipes.len()
    }
}

/// Load and override provider values, then resolve placeholders.
pub fn prepare_values(
    root: &Path,
    options: &ClusterOptions,
) -> RenderResult<(ProviderValues, ResolvedValues)> {
    let values = ProviderValues::load(OutputLayout::values_file(root, &options.provider))?
        .with_overrides(&options.overrides);
    let resolved = resolve(&options.provider, &values);
    Ok((values, resolved))
}

/// Sorted `*.yaml` templates in the shared templates directory.
///
/// A directory entry that cannot be read is a [`RenderError::Read`].
pub fn cluster_templates(layout: &OutputLayout) -> RenderResult<Vec<PathBuf>> {
    let pattern = layout.templates_dir().join("*.yaml");
    let mut paths = glob::glob(&pattern.to_string_lossy())?
        .map(|entry| {
            entry.map_err(|e| RenderError::Read {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })
        })
        .collect::<RenderResult<Vec<PathBuf>>>()?;
    paths.sort();
    Ok(paths)
}

/// Render cluster definition templates.
pub fn render_cluster_definition(
    layout: &OutputLayout,
    values: &ResolvedValues,
    strict: bool,
) -> RenderResult<Vec<PathBuf>> {
    let templates = cluster_templates(layout)?;
    TemplateRenderer::new()
        .strict(strict)
        .render_files(&templates, values, &layout.cluster_dir())
}

/// Render each addon into its own directory.
pub fn render_addons(
    layout: &OutputLayout,
    values: &ResolvedValues,
    strict: bool,
) -> RenderResult<Vec<PathBuf>> {
    let renderer = TemplateRenderer::new().strict(strict);
    let mut written = Vec::new();
    for (addon, template) in ADDONS {
        written.extend(renderer.render_files(
            &[layout.addon_template(template)],
            values,
            &layout.addon_dir(addon),
        )?);
    }
    Ok(written)
}

/// Render recipe manifests, adding `base` when missing.
pub fn render_recipes(layout: &OutputLayout, recipes: &[String]) -> RenderResult<Vec<PathBuf>> {
    RecipeRenderer::new().render(&with_base(recipes.to_vec()), &layout.recipes_dir())
}

/// Render the cluster definition, addons and recipes for one cluster.
///
/// The three stages write to disjoint directories and run on scoped
/// threads; files within a stage are written in order.
pub fn render_cluster(root: &Path, options: &ClusterOptions) -> RenderResult<RenderSummary> {
    let (values, resolved) = prepare_values(root, options)?;
    let layout = OutputLayout::new(root, &values.cluster_name);

    info!(
        "Rendering cluster {} for provider {}",
        values.cluster_name, options.provider
    );

    let (cluster, addons, recipes) = thread::scope(|s| {
        let cluster = s.spawn(|| render_cluster_definition(&layout, &resolved, options.strict));
        let addons = s.spawn(|| render_addons(&layout, &resolved, options.strict));
        let recipes = s.spawn(|| render_recipes(&layout, &options.recipes));
        (join_stage(cluster), join_stage(addons), join_stage(recipes))
    });

    Ok(RenderSummary {
        cluster_name: values.cluster_name,
        provider: options.provider.clone(),
        output_dir: layout.base_dir(),
        cluster: cluster?,
        addons: addons?,
        recipes: recipes?,
    })
}

fn join_stage(
    handle: thread::ScopedJoinHandle<'_, RenderResult<Vec<PathBuf>>>,
) -> RenderResult<Vec<PathBuf>> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new("/repo", "demo");

        assert_eq!(layout.cluster_dir(), PathBuf::from("/repo/out/demo/cluster"));
        assert_eq!(
            layout.addon_dir("cilium"),
            PathBuf::from("/repo/out/demo/addons/cilium")
        );
        assert_eq!(layout.recipes_dir(), PathBuf::from("/repo/out/demo/recipes"));
        assert_eq!(
            OutputLayout::values_file(Path::new("/repo"), "aws"),
            PathBuf::from("/repo/clusters/aws/values.example.yaml")
        );
    }

    #[test]
    fn test_cluster_templates_sorted_yaml_only() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "demo");
        fs::create_dir_all(layout.templates_dir()).unwrap();
        for name in ["workers.yaml", "cluster.yaml", "notes.txt"] {
            fs::write(layout.templates_dir().join(name), "a: 1\n").unwrap();
        }

        let templates = cluster_templates(&layout).unwrap();
        assert_eq!(
            templates,
            vec![
                layout.templates_dir().join("cluster.yaml"),
                layout.templates_dir().join("workers.yaml"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_templates_dir_is_read_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "demo");
        let templates_dir = layout.templates_dir();
        fs::create_dir_all(&templates_dir).unwrap();
        fs::write(templates_dir.join("cluster.yaml"), "a: 1\n").unwrap();
        fs::set_permissions(&templates_dir, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory.
        let listable = fs::read_dir(&templates_dir).is_ok();
        let result = cluster_templates(&layout);
        fs::set_permissions(&templates_dir, fs::Permissions::from_mode(0o755)).unwrap();
        if listable {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, RenderError::Read { ref path, .. } if path == &templates_dir));
    }

    #[test]
    fn test_options_default_to_base_recipe() {
        let options = ClusterOptions::new("proxmox");
        assert_eq!(options.recipes, vec!["base".to_string()]);
        assert!(!options.strict);
    }
}

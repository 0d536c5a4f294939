//! # infraflux_render
//!
//! Manifest rendering for InfraFlux cluster bring-up.
//!
//! This crate turns provider default values plus caller overrides into a set
//! of validated Kubernetes manifests on disk:
//!
//! - Provider values loading and override application
//! - Placeholder resolution (`${UPPER_SNAKE}` names to strings)
//! - Template substitution and multi-document YAML validation
//! - Flux `Kustomization` synthesis for recipe bundles
//!
//! ## Example
//!
//! ```rust,no_run
//! use infraflux_render::{resolve, ProviderValues, RecipeRenderer, TemplateRenderer};
//! use std::path::{Path, PathBuf};
//!
//! let values = ProviderValues::load("clusters/aws/values.example.yaml").unwrap();
//! let resolved = resolve("aws", &values);
//!
//! let renderer = TemplateRenderer::new();
//! renderer
//!     .render_files(&[PathBuf::from("clusters/templates/cluster.yaml")], &resolved, Path::new("out/demo/cluster"))
//!     .unwrap();
//!
//! RecipeRenderer::new()
//!     .render(&["base".to_string(), "networking".to_string()], Path::new("out/demo/recipes"))
//!     .unwrap();
//! ```

pub mod error;
pub mod pipeline;
pub mod provider;
pub mod recipes;
pub mod renderer;
pub mod resolver;
pub mod validator;
pub mod values;

pub use error::{RenderError, RenderResult, ValidationError};
pub use pipeline::{render_cluster, ClusterOptions, OutputLayout, RenderSummary};
pub use provider::Provider;
pub use recipes::{parse_recipe_list, with_base, RecipeRenderer, BASE_RECIPE};
pub use renderer::TemplateRenderer;
pub use resolver::{resolve, ResolvedValues};
pub use validator::validate_yaml;
pub use values::{NodePool, ProviderValues, ValueOverrides};

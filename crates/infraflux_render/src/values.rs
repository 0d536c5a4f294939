//! Provider default values.
//!
//! Each provider directory ships a `values.example.yaml` with the defaults
//! used to render its cluster. Missing keys fall back to empty strings and
//! zero replica counts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Replica count and machine size for a group of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodePool {
    pub replicas: u32,
    pub instance_type: String,
}

/// Defaults parsed from a provider values document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderValues {
    pub cluster_name: String,
    pub namespace: String,
    pub region: String,
    pub k8s_minor: String,
    pub talos_version: String,
    pub control_plane: NodePool,
    pub workers: NodePool,
}

/// Caller-supplied values that take precedence over provider defaults.
///
/// Unset fields leave the loaded default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueOverrides {
    pub cluster_name: Option<String>,
    pub region: Option<String>,
    pub k8s_minor: Option<String>,
    pub worker_replicas: Option<u32>,
}

impl ValueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster_name(mut self, name: impl Into<String>) -> Self {
        self.cluster_name = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_k8s_minor(mut self, minor: impl Into<String>) -> Self {
        self.k8s_minor = Some(minor.into());
        self
    }

    pub fn with_worker_replicas(mut self, replicas: u32) -> Self {
        self.worker_replicas = Some(replicas);
        self
    }
}

impl ProviderValues {
    /// Load provider values from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        debug!("Loading provider values from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| RenderError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| RenderError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse provider values from YAML text.
    ///
    /// An empty or null document yields all defaults.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let values: Option<Self> = serde_yaml::from_str(content)?;
        Ok(values.unwrap_or_default())
    }

    /// Apply caller overrides. Empty strings and a zero worker count are
    /// treated as unset.
    pub fn apply_overrides(&mut self, overrides: &ValueOverrides) {
        if let Some(name) = overrides.cluster_name.as_deref().filter(|s| !s.is_empty()) {
            self.cluster_name = name.to_string();
        }
        if let Some(region) = overrides.region.as_deref().filter(|s| !s.is_empty()) {
            self.region = region.to_string();
        }
        if let Some(minor) = overrides.k8s_minor.as_deref().filter(|s| !s.is_empty()) {
            self.k8s_minor = minor.to_string();
        }
        if let Some(replicas) = overrides.worker_replicas.filter(|r| *r > 0) {
            self.workers.replicas = replicas;
        }
    }

    /// Builder-style variant of [`apply_overrides`](Self::apply_overrides).
    pub fn with_overrides(mut self, overrides: &ValueOverrides) -> Self {
        self.apply_overrides(overrides);
        self
    }
}

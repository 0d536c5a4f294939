//! Optional YAML config file for `infraflux up`.
//!
//! Keys mirror the command-line flags. Flags win over file values, file
//! values win over built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CliConfig {
    pub provider: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub workers: Option<u32>,
    pub k8s_minor: Option<String>,
    pub recipes: Option<Vec<String>>,
    pub strict: Option<bool>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map(Self::load).transpose().map(Option::unwrap_or_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("infraflux.yaml");
        fs::write(
            &path,
            "provider: aws\nworkers: 4\nk8sMinor: \"1.31\"\nrecipes: [base, observability]\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.provider.as_deref(), Some("aws"));
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.k8s_minor.as_deref(), Some("1.31"));
        assert_eq!(
            config.recipes,
            Some(vec!["base".to_string(), "observability".to_string()])
        );
        assert_eq!(config.name, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("infraflux.yaml");
        fs::write(&path, "provdier: aws\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_no_config_is_default() {
        assert_eq!(CliConfig::load_optional(None).unwrap(), CliConfig::default());
    }
}

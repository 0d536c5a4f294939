//! Infrastructure provider definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Supported Cluster API infrastructure providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    Proxmox,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::Proxmox => "proxmox",
        }
    }

    /// Parse a provider identifier. Only the lowercase names match.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aws" => Some(Provider::Aws),
            "azure" => Some(Provider::Azure),
            "gcp" => Some(Provider::Gcp),
            "proxmox" => Some(Provider::Proxmox),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Provider::Aws,
            Provider::Azure,
            Provider::Gcp,
            Provider::Proxmox,
        ]
    }

    /// Kind of the provider's infrastructure cluster resource.
    pub fn infra_cluster_kind(&self) -> &'static str {
        match self {
            Provider::Aws => "AWSCluster",
            Provider::Azure => "AzureCluster",
            Provider::Gcp => "GCPCluster",
            Provider::Proxmox => "ProxmoxCluster",
        }
    }

    /// Kind of the provider's machine template resource.
    pub fn infra_machine_template_kind(&self) -> &'static str {
        match self {
            Provider::Aws => "AWSMachineTemplate",
            Provider::Azure => "AzureMachineTemplate",
            Provider::Gcp => "GCPMachineTemplate",
            Provider::Proxmox => "ProxmoxMachineTemplate",
        }
    }
}

impl FromStr for Provider {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::parse(s).ok_or_else(|| RenderError::UnknownProvider(s.to_string()))
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_exact_name() {
        assert_eq!(Provider::parse("aws"), Some(Provider::Aws));
        assert_eq!(Provider::parse("proxmox"), Some(Provider::Proxmox));
        assert_eq!(Provider::parse("AWS"), None);
        assert_eq!(Provider::parse("Proxmox"), None);
        assert_eq!(Provider::parse(" gcp"), None);
        assert_eq!(Provider::parse("openstack"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "vsphere".parse::<Provider>().unwrap_err();
        assert!(matches!(err, RenderError::UnknownProvider(ref p) if p == "vsphere"));
    }

    #[test]
    fn test_round_trip_names() {
        for provider in Provider::all() {
            assert_eq!(Provider::parse(provider.as_str()), Some(provider));
            assert_eq!(provider.to_string(), provider.as_str());
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Provider::Gcp.infra_cluster_kind(), "GCPCluster");
        assert_eq!(
            Provider::Azure.infra_machine_template_kind(),
            "AzureMachineTemplate"
        );
    }
}

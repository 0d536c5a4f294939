//! Placeholder value resolution.

use std::collections::HashMap;

use crate::provider::Provider;
use crate::values::ProviderValues;

/// Placeholder name to substituted value.
pub type ResolvedValues = HashMap<String, String>;

pub const CLUSTER_NAME: &str = "CLUSTER_NAME";
pub const NAMESPACE: &str = "NAMESPACE";
pub const REGION: &str = "REGION";
pub const K8S_MINOR: &str = "K8S_MINOR";
pub const TALOS_VERSION: &str = "TALOS_VERSION";
pub const CP_COUNT: &str = "CP_COUNT";
pub const WORKER_COUNT: &str = "WORKER_COUNT";
pub const PROVIDER_SPEC_CP: &str = "PROVIDER_SPEC_CP";
pub const PROVIDER_SPEC_WORKER: &str = "PROVIDER_SPEC_WORKER";
pub const CONTROL_PLANE_ENDPOINT: &str = "CONTROL_PLANE_ENDPOINT";
pub const INFRA_CLUSTER_KIND: &str = "INFRA_CLUSTER_KIND";
pub const INFRA_MACHINE_TEMPLATE_KIND: &str = "INFRA_MACHINE_TEMPLATE_KIND";

/// Build the substitution map for a provider.
///
/// Unknown providers still get every value except the two infrastructure
/// kind names, so generic templates render; callers wanting a strict check
/// should parse the provider with [`Provider::parse`] first.
pub fn resolve(provider: &str, values: &ProviderValues) -> ResolvedValues {
    let mut vals: ResolvedValues = [
        (CLUSTER_NAME, values.cluster_name.clone()),
        (NAMESPACE, values.namespace.clone()),
        (REGION, values.region.clone()),
        (K8S_MINOR, values.k8s_minor.clone()),
        (TALOS_VERSION, values.talos_version.clone()),
        (CP_COUNT, values.control_plane.replicas.to_string()),
        (WORKER_COUNT, values.workers.replicas.to_string()),
        (PROVIDER_SPEC_CP, values.control_plane.instance_type.clone()),
        (PROVIDER_SPEC_WORKER, values.workers.instance_type.clone()),
        (CONTROL_PLANE_ENDPOINT, String::new()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    if let Some(p) = Provider::parse(provider) {
        vals.insert(INFRA_CLUSTER_KIND.to_string(), p.infra_cluster_kind().to_string());
        vals.insert(
            INFRA_MACHINE_TEMPLATE_KIND.to_string(),
            p.infra_machine_template_kind().to_string(),
        );
    }

    vals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::NodePool;

    fn sample_values() -> ProviderValues {
        ProviderValues {
            cluster_name: "demo".to_string(),
            namespace: "default".to_string(),
            region: "us-east-1".to_string(),
            k8s_minor: "1.30".to_string(),
            talos_version: "v1.7.5".to_string(),
            control_plane: NodePool {
                replicas: 3,
                instance_type: "t3.medium".to_string(),
            },
            workers: NodePool {
                replicas: 2,
                instance_type: "t3.large".to_string(),
            },
        }
    }

    #[test]
    fn test_resolve_aws() {
        let vals = resolve("aws", &sample_values());

        assert_eq!(vals[CP_COUNT], "3");
        assert_eq!(vals[WORKER_COUNT], "2");
        assert_eq!(vals[INFRA_CLUSTER_KIND], "AWSCluster");
        assert_eq!(vals[INFRA_MACHINE_TEMPLATE_KIND], "AWSMachineTemplate");
        assert_eq!(vals[PROVIDER_SPEC_CP], "t3.medium");
        assert_eq!(vals[CONTROL_PLANE_ENDPOINT], "");
        assert_eq!(vals.len(), 12);
    }

    #[test]
    fn test_resolve_each_provider() {
        for provider in Provider::all() {
            let vals = resolve(provider.as_str(), &sample_values());
            assert_eq!(vals[INFRA_CLUSTER_KIND], provider.infra_cluster_kind());
        }
    }

    #[test]
    fn test_unknown_provider_omits_kinds() {
        let vals = resolve("openstack", &sample_values());

        assert_eq!(vals.len(), 10);
        assert!(!vals.contains_key(INFRA_CLUSTER_KIND));
        assert!(!vals.contains_key(INFRA_MACHINE_TEMPLATE_KIND));
        assert_eq!(vals[CLUSTER_NAME], "demo");
    }

    #[test]
    fn test_provider_match_is_exact() {
        for provider in ["AWS", "Azure", "GCP ", "Proxmox"] {
            let vals = resolve(provider, &sample_values());
            assert!(!vals.contains_key(INFRA_CLUSTER_KIND), "{provider}");
            assert!(!vals.contains_key(INFRA_MACHINE_TEMPLATE_KIND), "{provider}");
        }
    }

    #[test]
    fn test_defaults_render_as_zero_and_empty() {
        let vals = resolve("gcp", &ProviderValues::default());
        assert_eq!(vals[CP_COUNT], "0");
        assert_eq!(vals[REGION], "");
    }
}

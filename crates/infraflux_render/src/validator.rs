//! Structural validation of rendered YAML.

use serde::Deserialize;

use crate::error::ValidationError;

/// Check that every document in a YAML stream parses.
///
/// Documents are decoded in order and the first failure is reported with
/// its index. An empty stream is valid.
pub fn validate_yaml(content: &str) -> Result<(), ValidationError> {
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        serde_yaml::Value::deserialize(document).map_err(|source| ValidationError {
            document: index,
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        assert!(validate_yaml("").is_ok());
    }

    #[test]
    fn test_multi_document_valid() {
        let yaml = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: ok\n---\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: test\n";
        assert!(validate_yaml(yaml).is_ok());
    }

    #[test]
    fn test_comment_only_is_valid() {
        assert!(validate_yaml("# nothing to see here\n").is_ok());
    }

    #[test]
    fn test_nested_unindented_mapping_is_invalid() {
        let yaml = "apiVersion: v1\nkind: ConfigMap\nmetadata: name: bad\n";
        let err = validate_yaml(yaml).unwrap_err();
        assert_eq!(err.document, 0);
    }

    #[test]
    fn test_reports_first_bad_document() {
        let yaml = "kind: A\n---\nkind: B\n---\napiVersion: v1\nkind: C\nmetadata: name: bad\n";
        let err = validate_yaml(yaml).unwrap_err();
        assert_eq!(err.document, 2);
    }
}

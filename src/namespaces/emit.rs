//! Custom overrides and output
//!
//! The final document maps app names to opaque YAML values so a custom
//! namespace may carry fields the generator knows nothing about.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::types::Namespace;
use crate::error::{GeneratorError, Result};

/// App name -> namespace, as written to `namespaces.yaml`
pub type NamespacesDocument = BTreeMap<String, serde_yaml::Value>;

/// Convert generated namespaces to the document form
pub fn to_document(namespaces: &BTreeMap<String, Namespace>) -> Result<NamespacesDocument> {
    namespaces
        .iter()
        .map(|(app_name, namespace)| -> Result<(String, serde_yaml::Value)> {
            Ok((app_name.clone(), serde_yaml::to_value(namespace)?))
        })
        .collect()
}

/// Replace generated namespaces with custom ones of the same name.
///
/// Replacement is shallow: a custom namespace is taken as-is, nothing of the
/// generated value survives.
pub fn merge_custom(
    mut generated: NamespacesDocument,
    custom: NamespacesDocument,
) -> NamespacesDocument {
    for (app_name, namespace) in custom {
        if generated.insert(app_name.clone(), namespace).is_some() {
            debug!("Custom namespace replaces generated '{}'", app_name);
        }
    }
    generated
}

/// Parse a custom namespaces document; an empty document has no overrides
pub fn parse_custom_namespaces(content: &str, path: &Path) -> Result<NamespacesDocument> {
    let parsed: Option<NamespacesDocument> =
        serde_yaml::from_str(content).map_err(|e| GeneratorError::CustomNamespaces {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(parsed.unwrap_or_default())
}

pub fn load_custom_namespaces(path: &Path) -> Result<NamespacesDocument> {
    let content =
        std::fs::read_to_string(path).map_err(|e| GeneratorError::CustomNamespaces {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let custom = parse_custom_namespaces(&content, path)?;
    info!("Loaded {} custom namespaces from {:?}", custom.len(), path);
    Ok(custom)
}

pub fn to_yaml(document: &NamespacesDocument) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Write `content` to `path` via a temporary file in the same directory
///
/// The previous file is replaced in one rename; a failed write leaves it untouched.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| GeneratorError::Io(e.error))?;

    info!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use tempfile::TempDir;

    fn doc(yaml: &str) -> NamespacesDocument {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_merge_replaces_wholesale() {
        let generated = doc(
            r#"
App1:
  canonical_app_name: App 1
  views:
    baseline:
    - table: mozdata.app1.baseline
  explores: {}
App2:
  canonical_app_name: App 2
  views: {}
  explores: {}
"#,
        );
        let custom = doc(
            r#"
App1:
  canonical_app_name: Custom
  views: {}
  explores: {}
"#,
        );

        let merged = merge_custom(generated.clone(), custom.clone());
        assert_eq!(merged["App1"], custom["App1"]);
        assert_eq!(merged["App2"], generated["App2"]);
    }

    #[test]
    fn test_merge_adds_new_namespaces() {
        let merged = merge_custom(
            NamespacesDocument::new(),
            doc("custom-app:\n  pretty_name: Custom App\n"),
        );
        assert_eq!(
            merged["custom-app"]["pretty_name"],
            Value::String("Custom App".into())
        );
    }

    #[test]
    fn test_parse_empty_custom_file() {
        let custom = parse_custom_namespaces("", Path::new("custom.yaml")).unwrap();
        assert!(custom.is_empty());
    }

    #[test]
    fn test_parse_malformed_custom_file() {
        let err = parse_custom_namespaces("- just\n- a list\n", Path::new("custom.yaml"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::CustomNamespaces { .. }));
    }

    #[test]
    fn test_load_missing_custom_file() {
        let temp = TempDir::new().unwrap();
        let err = load_custom_namespaces(&temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, GeneratorError::CustomNamespaces { .. }));
    }

    #[test]
    fn test_write_atomically_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("namespaces.yaml");
        std::fs::write(&path, "stale: true\nmore: stuff\n").unwrap();

        write_atomically(&path, "fresh: true\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh: true\n");
        let leftovers: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_yaml_keys_sorted() {
        let document = doc("b: {}\na: {}\n");
        assert_eq!(to_yaml(&document).unwrap(), "a: {}\nb: {}\n");
    }
}

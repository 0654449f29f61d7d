//! Rendering CustomResourceDefinitions as YAML manifests

use std::fs;
use std::path::{Path, PathBuf};

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use tracing::info;

use crate::error::{Error, Result};

/// Render definitions as one multi-document YAML stream
pub fn render_crds(crds: &[CustomResourceDefinition]) -> Result<String> {
    let mut out = String::new();
    for crd in crds {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(crd)?);
    }
    Ok(out)
}

/// Write one `<crd-name>.yaml` file per definition into `dir`
pub fn write_crds(dir: &Path, crds: &[CustomResourceDefinition]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(crds.len());
    for crd in crds {
        let name = crd.metadata.name.as_deref().ok_or_else(|| {
            Error::Configuration("CustomResourceDefinition without metadata.name".to_string())
        })?;
        let path = dir.join(format!("{name}.yaml"));
        fs::write(&path, serde_yaml::to_string(crd)?)?;
        info!(path = %path.display(), "Wrote CRD manifest");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{self, STORAGE_VERSION};
    use crate::registry::TypeRegistry;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    fn all_crds() -> Vec<CustomResourceDefinition> {
        let mut registry = TypeRegistry::new();
        crd::register_all(&mut registry).unwrap();
        registry.crds(STORAGE_VERSION).unwrap()
    }

    #[test]
    fn test_render_crds() {
        let crds = all_crds();
        let yaml = render_crds(&crds).unwrap();

        assert_eq!(yaml.matches("---\n").count(), crds.len());
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("name: contentlibraryitems.imageregistry.vmware.com"));

        let docs: Vec<CustomResourceDefinition> = yaml
            .split("---\n")
            .filter(|d| !d.trim().is_empty())
            .map(|d| serde_yaml::from_str(d).unwrap())
            .collect();
        assert_eq!(docs.len(), crds.len());
        assert_eq!(docs[0].spec.names.kind, "ContentLibrary");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_crds(&[]).unwrap(), "");
    }

    #[test]
    fn test_write_crds() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("crds");
        let crds = all_crds();

        let written = write_crds(&out, &crds).unwrap();
        assert_eq!(written.len(), 4);
        assert!(out
            .join("clustercontentlibraries.imageregistry.vmware.com.yaml")
            .exists());

        let content = std::fs::read_to_string(&written[0]).unwrap();
        let parsed: CustomResourceDefinition = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.metadata.name, crds[0].metadata.name);
    }

    #[test]
    fn test_write_crds_requires_name() {
        let dir = TempDir::new().unwrap();
        let mut crd = all_crds().remove(0);
        crd.metadata.name = None;

        assert_matches!(
            write_crds(dir.path(), &[crd]),
            Err(Error::Configuration(_))
        );
    }
}

//! Type registry for the content library kinds
//!
//! Kinds are registered explicitly by the hosting process at startup, in a
//! fixed order, instead of through load-time side effects. The registry is
//! then used to render or install the merged CustomResourceDefinitions.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::crd::merge_crds;
use kube::{CustomResourceExt, Resource};
use tracing::debug;

use crate::error::{Error, Result};

// =============================================================================
// Registered Kind
// =============================================================================

/// Scope of a registered kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    Namespaced,
    Cluster,
}

impl std::fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceScope::Namespaced => write!(f, "Namespaced"),
            ResourceScope::Cluster => write!(f, "Cluster"),
        }
    }
}

/// A kind and its list wrapper as known to the registry
#[derive(Debug, Clone)]
pub struct RegisteredKind {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub list_kind: String,
    pub plural: String,
    pub short_names: Vec<String>,
    pub scope: ResourceScope,
    /// Single-version definition generated from the Rust type
    pub crd: CustomResourceDefinition,
}

impl RegisteredKind {
    /// `group/version`
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    /// `<plural>.<group>`, the CRD object name
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.plural, self.group)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered set of registered kinds
#[derive(Debug, Default)]
pub struct TypeRegistry {
    kinds: Vec<RegisteredKind>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind and its list wrapper.
    ///
    /// Fails if the same group/version/kind was registered before.
    pub fn register<K>(&mut self) -> Result<()>
    where
        K: CustomResourceExt + Resource<DynamicType = ()>,
    {
        let group = K::group(&()).to_string();
        let version = K::version(&()).to_string();
        let kind = K::kind(&()).to_string();

        if self.get(&group, &version, &kind).is_some() {
            return Err(Error::DuplicateRegistration {
                group,
                version,
                kind,
            });
        }

        let crd = K::crd();
        let scope = if crd.spec.scope == "Cluster" {
            ResourceScope::Cluster
        } else {
            ResourceScope::Namespaced
        };

        debug!(%group, %version, %kind, %scope, "Registered kind");
        self.kinds.push(RegisteredKind {
            list_kind: format!("{kind}List"),
            plural: K::plural(&()).to_string(),
            short_names: K::shortnames().iter().map(|s| s.to_string()).collect(),
            group,
            version,
            kind,
            scope,
            crd,
        });
        Ok(())
    }

    /// Look up a registered kind
    pub fn get(&self, group: &str, version: &str, kind: &str) -> Option<&RegisteredKind> {
        self.kinds
            .iter()
            .find(|k| k.group == group && k.version == version && k.kind == kind)
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &RegisteredKind> {
        self.kinds.iter()
    }

    /// Versions registered for a group/kind, in registration order
    pub fn versions_of(&self, group: &str, kind: &str) -> Vec<&str> {
        self.kinds
            .iter()
            .filter(|k| k.group == group && k.kind == kind)
            .map(|k| k.version.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// One CustomResourceDefinition per group/kind, with every registered
    /// version merged in and `storage_version` marked as the stored one.
    ///
    /// A kind registered at a single version keeps that version as storage.
    pub fn crds(&self, storage_version: &str) -> Result<Vec<CustomResourceDefinition>> {
        let mut grouped: Vec<(String, Vec<CustomResourceDefinition>)> = Vec::new();
        for registered in &self.kinds {
            let name = registered.crd_name();
            match grouped.iter_mut().find(|(n, _)| *n == name) {
                Some((_, crds)) => crds.push(registered.crd.clone()),
                None => grouped.push((name, vec![registered.crd.clone()])),
            }
        }

        grouped
            .into_iter()
            .map(|(name, mut crds)| {
                if crds.len() == 1 {
                    return Ok(crds.remove(0));
                }
                debug!(%name, versions = crds.len(), %storage_version, "Merging CRD versions");
                merge_crds(crds, storage_version).map_err(|e| Error::CrdMerge {
                    name,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

//! Custom Resource Definitions for content libraries
//!
//! This module contains all CRD types, grouped by schema generation:
//! - v1alpha1: name-keyed ContentLibrary, ContentLibraryItem, ClusterContentLibraryItem
//! - v1alpha2: UUID-keyed ContentLibrary, ClusterContentLibrary, ContentLibraryItem,
//!   ClusterContentLibraryItem (storage version)
//!
//! Every kind exposes its status conditions through [`Conditioned`].

pub mod conditions;
pub mod v1alpha1;
pub mod v1alpha2;

pub use conditions::{Condition, ConditionSeverity, ConditionStatus, Conditioned, ConditionedStatus};

use crate::error::Result;
use crate::registry::TypeRegistry;

/// API group shared by every content library kind
pub const GROUP: &str = "imageregistry.vmware.com";

/// Version persisted by the API server when a kind is served at several versions
pub const STORAGE_VERSION: &str = v1alpha2::VERSION;

/// Register every kind of every schema generation, oldest first
pub fn register_all(registry: &mut TypeRegistry) -> Result<()> {
    v1alpha1::register(registry)?;
    v1alpha2::register(registry)?;
    Ok(())
}

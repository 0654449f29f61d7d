//! First generation of the content library schemas
//!
//! Name-keyed: items reference their library by resource name in the spec,
//! and backend identifiers only appear in status.
//!
//! - ContentLibrary: namespaced library mirror
//! - ContentLibraryItem: namespaced library item mirror
//! - ClusterContentLibraryItem: cluster-scoped library item mirror

pub mod cluster_content_library_item;
pub mod content_library;
pub mod content_library_item;

pub use cluster_content_library_item::*;
pub use content_library::*;
pub use content_library_item::*;

use kube::core::ObjectList;

use crate::error::Result;
use crate::registry::TypeRegistry;

pub const VERSION: &str = "v1alpha1";

pub type ContentLibraryList = ObjectList<ContentLibrary>;
pub type ContentLibraryItemList = ObjectList<ContentLibraryItem>;
pub type ClusterContentLibraryItemList = ObjectList<ClusterContentLibraryItem>;

/// Register every v1alpha1 kind
pub fn register(registry: &mut TypeRegistry) -> Result<()> {
    registry.register::<ContentLibrary>()?;
    registry.register::<ContentLibraryItem>()?;
    registry.register::<ClusterContentLibraryItem>()?;
    Ok(())
}

//! Content Library API - custom resource schemas
//!
//! Declarative schemas for content libraries and their items mirrored from a
//! virtualization management system into Kubernetes. A controller (not part
//! of this crate) reconciles them; this crate provides the types, the shared
//! status-condition model, and explicit registration of the kinds.
//!
//! # Modules
//!
//! - [`crd`]: Custom Resource Definitions and the condition model
//! - [`registry`]: Explicit, ordered type registration
//! - [`manifest`]: YAML rendering of the merged CRDs
//! - [`installer`]: Server-side apply of the CRDs into a cluster
//! - [`error`]: Error types and handling

pub mod crd;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod registry;

// Re-export commonly used types
pub use crd::{
    register_all, Condition, ConditionSeverity, ConditionStatus, Conditioned, ConditionedStatus,
    GROUP, STORAGE_VERSION,
};

pub use error::{Error, Result};

pub use installer::{CrdInstaller, InstallerConfig};

pub use manifest::{render_crds, write_crds};

pub use registry::{RegisteredKind, ResourceScope, TypeRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

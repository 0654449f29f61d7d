//! Error types for the content library API crate
//!
//! The condition model and the schema types are infallible. Errors only come
//! from type registration, CRD rendering, and installing CRDs into a cluster.

use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Kubernetes Errors
    // =========================================================================
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] kube::runtime::wait::Error),

    #[error("Timed out waiting for {kind}/{name} to become established")]
    Timeout { kind: String, name: String },

    // =========================================================================
    // Registration Errors
    // =========================================================================
    #[error("Type already registered: {group}/{version}, Kind={kind}")]
    DuplicateRegistration {
        group: String,
        version: String,
        kind: String,
    },

    #[error("Failed to merge CRD versions for {name}: {reason}")]
    CrdMerge { name: String, reason: String },

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is transient
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Kube(kube::Error::Api(resp)) => resp.code >= 500,
            Error::Kube(_) | Error::Watch(_) | Error::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Check if retrying the same operation can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Kube(kube::Error::Api(resp)) => resp.code >= 500 || resp.code == 409,
            Error::Kube(_) | Error::Watch(_) | Error::Timeout { .. } | Error::Io(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

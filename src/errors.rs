//! Error types for distclus
//!
//! This module defines the error types used throughout the library.
//! Every failure at the binding boundary is reported through [`DistclusError`]
//! rather than a panic.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DistclusError>;

/// Main error type for distclus
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistclusError {
    /// An integer ordinal does not name any variant of the enumeration
    #[error("Invalid variant: {ordinal} is not a valid {kind} ordinal")]
    InvalidVariant { kind: &'static str, ordinal: i64 },

    /// A textual name does not match any variant of the enumeration
    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// A flat buffer does not match its declared shape
    #[error("Invalid shape: {message}")]
    InvalidShape { message: String },

    /// No algorithm is registered under the descriptor
    #[error("Unknown descriptor: {descr}")]
    UnknownDescriptor { descr: i32 },

    /// Results were requested before the clustering had anything to work on
    #[error("clustering not started")]
    NotStarted,

    /// The algorithm does not provide the requested operation
    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Failure reported by an algorithm implementation
    #[error("Algorithm error: {message}")]
    Algorithm { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DistclusError {
    /// Create an invalid variant error
    pub fn invalid_variant(kind: &'static str, ordinal: impl Into<i64>) -> Self {
        Self::InvalidVariant {
            kind,
            ordinal: ordinal.into(),
        }
    }

    /// Create an unknown name error
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// Create an invalid shape error
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Create an unknown descriptor error
    pub fn unknown_descriptor(descr: i32) -> Self {
        Self::UnknownDescriptor { descr }
    }

    /// Create an unsupported operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an algorithm error
    pub fn algorithm(message: impl Into<String>) -> Self {
        Self::Algorithm {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error only means the clustering has not started yet
    /// (retrying after more data or a run may succeed)
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }
}

impl From<serde_json::Error> for DistclusError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DistclusError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::internal(format!("lock poisoned: {}", err))
    }
}

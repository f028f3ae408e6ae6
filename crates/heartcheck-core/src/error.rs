//! Error types for HeartCheck

use crate::feature::Feature;
use std::path::PathBuf;

/// Result type alias using HeartCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for HeartCheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input field has no value
    #[error("missing feature: {0}")]
    MissingFeature(Feature),

    /// An input or artifact names a field outside the catalogue
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// An input value lies outside its field's domain
    #[error("{feature} out of domain: {message}")]
    OutOfDomain { feature: Feature, message: String },

    /// Artifact schema errors (feature order, coefficient shape)
    #[error("schema error: {0}")]
    Schema(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// No artifact at the given path
    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new out-of-domain error
    pub fn out_of_domain(feature: Feature, msg: impl Into<String>) -> Self {
        Self::OutOfDomain {
            feature,
            message: msg.into(),
        }
    }

    /// Create a new schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }
}

//! HeartCheck Core
//!
//! Core types shared across HeartCheck components.
//!
//! This crate provides:
//! - The fixed catalogue of thirteen clinical input fields and their domains
//! - Feature inputs (the form's current values) and ordered feature records
//! - Error types and result handling

pub mod error;
pub mod feature;
pub mod record;

pub use error::{Error, Result};
pub use feature::{Domain, Feature, FeatureKind, FeatureValue};
pub use record::{validate_order, FeatureInputs, FeatureRecord};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::feature::{Feature, FeatureValue};
    pub use crate::record::{FeatureInputs, FeatureRecord};
}

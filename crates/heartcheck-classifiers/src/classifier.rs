//! Classifier capability traits

use heartcheck_core::{Feature, FeatureRecord, Result};

/// Trait for all classifiers
///
/// Prediction is the only required capability. The two optional capabilities
/// are queried independently: a declared input order via
/// [`feature_names`](Classifier::feature_names) and probability estimation via
/// [`probability`](Classifier::probability).
pub trait Classifier: Send + Sync {
    /// Get the classifier name
    fn name(&self) -> &str;

    /// Predict the integer label for a single-row record
    fn predict(&self, record: &FeatureRecord) -> Result<i64>;

    /// The input order the classifier was trained with, if it declares one
    fn feature_names(&self) -> Option<&[Feature]> {
        None
    }

    /// Probability estimation capability, if supported
    fn probability(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }

    /// Model version string, if known
    fn version(&self) -> Option<&str> {
        None
    }
}

/// Per-class probability estimation
pub trait ProbabilityEstimator: Send + Sync {
    /// Class probabilities for a single-row record, indexed by label
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<f64>>;
}

//! Stub classifiers for testing
//!
//! Configurable implementations of the Classifier trait for exercising the
//! adapter's ordering and optional-capability handling.

#![allow(dead_code)]

use heartcheck_classifiers::{Classifier, ProbabilityEstimator};
use heartcheck_core::{Feature, FeatureRecord, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// A classifier returning a fixed label and, optionally, a fixed probability
pub struct StubClassifier {
    name: String,
    label: i64,
    probability: Option<f64>,
    feature_names: Option<Vec<Feature>>,
    call_count: AtomicU32,
    last_record: Mutex<Option<FeatureRecord>>,
}

impl StubClassifier {
    /// Create a stub that predicts label 0 and estimates no probability
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: 0,
            probability: None,
            feature_names: None,
            call_count: AtomicU32::new(0),
            last_record: Mutex::new(None),
        }
    }

    /// Set the label this classifier will return
    pub fn with_label(mut self, label: i64) -> Self {
        self.label = label;
        self
    }

    /// Enable probability estimation with a fixed positive-class probability
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Declare the input order the classifier expects
    pub fn with_feature_names(mut self, order: Vec<Feature>) -> Self {
        self.feature_names = Some(order);
        self
    }

    /// Get the number of times predict was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The record passed to the most recent predict call
    pub fn last_record(&self) -> Option<FeatureRecord> {
        self.last_record.lock().unwrap().clone()
    }
}

impl Classifier for StubClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_record.lock().unwrap() = Some(record.clone());
        Ok(self.label)
    }

    fn feature_names(&self) -> Option<&[Feature]> {
        self.feature_names.as_deref()
    }

    fn probability(&self) -> Option<&dyn ProbabilityEstimator> {
        self.probability.map(|_| self as &dyn ProbabilityEstimator)
    }
}

impl ProbabilityEstimator for StubClassifier {
    fn predict_proba(&self, _record: &FeatureRecord) -> Result<Vec<f64>> {
        let p = self.probability.unwrap_or(0.0);
        Ok(vec![1.0 - p, p])
    }
}

/// A classifier whose prediction always fails
pub struct FailingClassifier {
    error_message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            error_message: message.to_string(),
        }
    }
}

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
        Err(heartcheck_core::Error::classifier(&self.error_message))
    }
}

/// A classifier whose probability output has a single class
pub struct OneClassClassifier;

impl Classifier for OneClassClassifier {
    fn name(&self) -> &str {
        "one-class"
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
        Ok(0)
    }

    fn probability(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }
}

impl ProbabilityEstimator for OneClassClassifier {
    fn predict_proba(&self, _record: &FeatureRecord) -> Result<Vec<f64>> {
        Ok(vec![1.0])
    }
}

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The UCI dataset's column order, which differs from the form's order
pub fn uci_order() -> Vec<Feature> {
    [
        "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
        "slope", "ca", "thal",
    ]
    .iter()
    .map(|name| name.parse().unwrap())
    .collect()
}

//! Feature adaptation and prediction
//!
//! Reconciles the form's inputs with the input contract of a loaded
//! classifier. When the classifier declares the order it was trained with,
//! the record follows that order exactly; otherwise it follows
//! [`Feature::ALL`](heartcheck_core::Feature::ALL).

use crate::classifier::Classifier;
use heartcheck_core::{Error, FeatureInputs, FeatureRecord, Result};
use serde::Serialize;
use tracing::debug;

/// Result of one prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Predicted label (1 = disease present)
    pub label: i64,

    /// Positive-class probability, when the classifier estimates one
    pub probability: Option<f64>,

    /// The exact record the classifier saw
    pub record: FeatureRecord,
}

impl Prediction {
    pub fn is_positive(&self) -> bool {
        self.label == 1
    }

    /// Probability rounded to three decimals for display
    pub fn probability_display(&self) -> Option<String> {
        self.probability.map(|p| format!("{:.3}", p))
    }
}

/// Build the record in the order the classifier expects
pub fn build_record(inputs: &FeatureInputs, classifier: &dyn Classifier) -> Result<FeatureRecord> {
    match classifier.feature_names() {
        Some(order) => FeatureRecord::from_order(inputs, order),
        None => FeatureRecord::in_default_order(inputs),
    }
}

/// Run one prediction cycle
///
/// Errors from the classifier itself are passed through untouched.
pub fn predict(inputs: &FeatureInputs, classifier: &dyn Classifier) -> Result<Prediction> {
    let record = build_record(inputs, classifier)?;
    let label = classifier.predict(&record)?;

    let probability = match classifier.probability() {
        Some(estimator) => Some(positive_class(&estimator.predict_proba(&record)?)?),
        None => None,
    };

    debug!(
        model = classifier.name(),
        label,
        probability = ?probability,
        "Prediction complete"
    );

    Ok(Prediction {
        label,
        probability,
        record,
    })
}

fn positive_class(proba: &[f64]) -> Result<f64> {
    proba.get(1).copied().ok_or_else(|| {
        Error::classifier(format!(
            "probability output has {} classes, expected 2",
            proba.len()
        ))
    })
}

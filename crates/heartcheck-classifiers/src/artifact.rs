//! Serialized classifier artifacts
//!
//! An artifact is a JSON or YAML document tagged by `type`:
//!
//! ```yaml
//! type: logistic-regression
//! name: heart-lr
//! feature_names: [age, sex, cp, ...]
//! coefficients: [0.03, 1.1, 0.8, ...]
//! intercept: -4.2
//! scaler:
//!   mean: [54.4, 0.68, ...]
//!   scale: [9.0, 0.47, ...]
//! ```
//!
//! Coefficients (and scaler vectors) are aligned with `feature_names` when it
//! is present, otherwise with the default feature order.

use crate::classifier::{Classifier, ProbabilityEstimator};
use heartcheck_core::{validate_order, Error, Feature, FeatureRecord, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Any supported classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelArtifact {
    /// Binary logistic regression with optional standardization
    LogisticRegression(LogisticRegression),

    /// Linear max-margin classifier; no probability output
    LinearSvm(LinearSvm),
}

impl ModelArtifact {
    /// Check shapes and the declared feature order
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::LogisticRegression(lr) => lr.validate(),
            ModelArtifact::LinearSvm(svm) => svm.validate(),
        }
    }

    /// Turn the artifact into a shareable classifier
    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            ModelArtifact::LogisticRegression(lr) => Arc::new(lr),
            ModelArtifact::LinearSvm(svm) => Arc::new(svm),
        }
    }
}

/// Per-feature standardization applied before the linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn validate(&self, width: usize) -> Result<()> {
        if self.mean.len() != width || self.scale.len() != width {
            return Err(Error::schema(format!(
                "scaler has {} means and {} scales, expected {}",
                self.mean.len(),
                self.scale.len(),
                width
            )));
        }
        if let Some(i) = self.scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(Error::schema(format!("scaler scale at index {} is not usable", i)));
        }
        Ok(())
    }

    fn transform(&self, row: &mut [f64]) {
        for ((x, mean), scale) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *x = (*x - mean) / scale;
        }
    }
}

/// Binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default = "default_lr_name")]
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    /// Input order the model was trained with
    #[serde(default)]
    pub feature_names: Option<Vec<Feature>>,

    pub coefficients: Vec<f64>,

    pub intercept: f64,

    #[serde(default)]
    pub scaler: Option<StandardScaler>,

    /// Positive-class probability at which the label flips to 1
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_lr_name() -> String {
    "logistic-regression".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

impl LogisticRegression {
    fn validate(&self) -> Result<()> {
        validate_linear(self.feature_names.as_deref(), &self.coefficients, self.intercept)?;
        if let Some(scaler) = &self.scaler {
            scaler.validate(self.coefficients.len())?;
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::schema(format!(
                "threshold must lie in (0, 1), got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Positive-class probability
    fn positive_probability(&self, record: &FeatureRecord) -> Result<f64> {
        let mut row = checked_row(self.feature_names.as_deref(), self.coefficients.len(), record)?;
        if let Some(scaler) = &self.scaler {
            scaler.transform(&mut row);
        }
        Ok(sigmoid(decision(&self.coefficients, self.intercept, &row)))
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        let p = self.positive_probability(record)?;
        Ok(i64::from(p >= self.threshold))
    }

    fn feature_names(&self) -> Option<&[Feature]> {
        self.feature_names.as_deref()
    }

    fn probability(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl ProbabilityEstimator for LogisticRegression {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        let p = self.positive_probability(record)?;
        Ok(vec![1.0 - p, p])
    }
}

/// Linear max-margin classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvm {
    #[serde(default = "default_svm_name")]
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub feature_names: Option<Vec<Feature>>,

    pub coefficients: Vec<f64>,

    pub intercept: f64,
}

fn default_svm_name() -> String {
    "linear-svm".to_string()
}

impl LinearSvm {
    fn validate(&self) -> Result<()> {
        validate_linear(self.feature_names.as_deref(), &self.coefficients, self.intercept)
    }
}

impl Classifier for LinearSvm {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        let row = checked_row(self.feature_names.as_deref(), self.coefficients.len(), record)?;
        Ok(i64::from(decision(&self.coefficients, self.intercept, &row) >= 0.0))
    }

    fn feature_names(&self) -> Option<&[Feature]> {
        self.feature_names.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

fn validate_linear(feature_names: Option<&[Feature]>, coefficients: &[f64], intercept: f64) -> Result<()> {
    if let Some(order) = feature_names {
        validate_order(order)?;
    }
    if coefficients.len() != Feature::COUNT {
        return Err(Error::schema(format!(
            "expected {} coefficients, found {}",
            Feature::COUNT,
            coefficients.len()
        )));
    }
    if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(Error::schema("coefficients must be finite"));
    }
    Ok(())
}

/// Numeric row for a record, refusing records built for a different order
fn checked_row(feature_names: Option<&[Feature]>, width: usize, record: &FeatureRecord) -> Result<Vec<f64>> {
    let expected = feature_names.unwrap_or(&Feature::ALL);
    if record.features() != expected {
        return Err(Error::classifier(
            "record field order does not match the order the model was trained with",
        ));
    }
    if record.len() != width {
        return Err(Error::classifier(format!(
            "record has {} fields, model expects {}",
            record.len(),
            width
        )));
    }
    Ok(record.as_f64_row())
}

fn decision(coefficients: &[f64], intercept: f64, row: &[f64]) -> f64 {
    coefficients.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + intercept
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

//! The fixed catalogue of clinical input fields
//!
//! Every prediction is made from exactly the thirteen fields listed in
//! [`Feature::ALL`]. The order of that array is the default record order used
//! when a classifier does not declare its own: the five numeric measurements
//! first, then the eight categorical codes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the thirteen clinical input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Age,
    Trestbps,
    Chol,
    Oldpeak,
    Thalach,
    Cp,
    Exang,
    Thal,
    Sex,
    Ca,
    Fbs,
    Restecg,
    Slope,
}

/// Whether a field is a continuous measurement or a small integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// Accepted values for a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Domain {
    /// Closed interval; `step` is the form's input granularity
    Range { min: f64, max: f64, step: f64 },
    /// Enumerated integer codes
    Options { values: &'static [i64] },
}

impl Domain {
    /// Check a value against this domain
    pub fn contains(&self, value: FeatureValue) -> bool {
        match (*self, value) {
            (Domain::Range { min, max, .. }, v) => {
                let v = v.as_f64();
                v.is_finite() && v >= min && v <= max
            }
            (Domain::Options { values }, FeatureValue::Categorical(code)) => values.contains(&code),
            (Domain::Options { .. }, FeatureValue::Numeric(_)) => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Domain::Range { min, max, .. } => format!("expected a value in [{}, {}]", min, max),
            Domain::Options { values } => {
                let opts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("expected one of {{{}}}", opts.join(", "))
            }
        }
    }
}

impl Feature {
    /// All features in default record order
    pub const ALL: [Feature; 13] = [
        Feature::Age,
        Feature::Trestbps,
        Feature::Chol,
        Feature::Oldpeak,
        Feature::Thalach,
        Feature::Cp,
        Feature::Exang,
        Feature::Thal,
        Feature::Sex,
        Feature::Ca,
        Feature::Fbs,
        Feature::Restecg,
        Feature::Slope,
    ];

    /// Number of features every record carries
    pub const COUNT: usize = Self::ALL.len();

    /// Wire name used in artifacts, form fields and JSON
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Trestbps => "trestbps",
            Feature::Chol => "chol",
            Feature::Oldpeak => "oldpeak",
            Feature::Thalach => "thalach",
            Feature::Cp => "cp",
            Feature::Exang => "exang",
            Feature::Thal => "thal",
            Feature::Sex => "sex",
            Feature::Ca => "ca",
            Feature::Fbs => "fbs",
            Feature::Restecg => "restecg",
            Feature::Slope => "slope",
        }
    }

    /// Short form label
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::Trestbps => "Resting BP (mm Hg)",
            Feature::Chol => "Serum Cholesterol (mg/dl)",
            Feature::Oldpeak => "Oldpeak",
            Feature::Thalach => "Max Heart Rate Achieved",
            Feature::Cp => "Chest Pain Type (1-4)",
            Feature::Exang => "Exercise Induced Angina (0/1)",
            Feature::Thal => "Thalassemia (1,2,3)",
            Feature::Sex => "Sex (0=female,1=male)",
            Feature::Ca => "No. Major Vessels (0-3)",
            Feature::Fbs => "Fasting Blood Sugar >120 (0/1)",
            Feature::Restecg => "Resting ECG (0-2)",
            Feature::Slope => "ST Slope (0-2)",
        }
    }

    /// Longer description shown as form help
    pub fn help(&self) -> &'static str {
        match self {
            Feature::Age => "Age in years",
            Feature::Trestbps => "Resting blood pressure (in mm Hg)",
            Feature::Chol => "Serum cholesterol (in mg/dl)",
            Feature::Oldpeak => "Oldpeak (depression induced by exercise relative to rest)",
            Feature::Thalach => "Maximum heart rate achieved",
            Feature::Cp => "Chest pain type (1-4)",
            Feature::Exang => "Exercise induced angina (1 = yes; 0 = no)",
            Feature::Thal => "Thalassemia (1 = normal; 2 = fixed defect; 3 = reversible defect)",
            Feature::Sex => "Sex (1 = male; 0 = female)",
            Feature::Ca => "Number of major vessels (0-3) colored by fluoroscopy",
            Feature::Fbs => "Fasting blood sugar > 120 mg/dl (1 = yes; 0 = no)",
            Feature::Restecg => "Resting electrocardiographic results (0-2)",
            Feature::Slope => "Slope of the peak exercise ST segment (0-2)",
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Age | Feature::Trestbps | Feature::Chol | Feature::Oldpeak | Feature::Thalach => {
                FeatureKind::Numeric
            }
            _ => FeatureKind::Categorical,
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Feature::Age => Domain::Range { min: 1.0, max: 120.0, step: 1.0 },
            Feature::Trestbps => Domain::Range { min: 50.0, max: 260.0, step: 1.0 },
            Feature::Chol => Domain::Range { min: 80.0, max: 700.0, step: 1.0 },
            Feature::Oldpeak => Domain::Range { min: 0.0, max: 10.0, step: 0.1 },
            Feature::Thalach => Domain::Range { min: 60.0, max: 250.0, step: 1.0 },
            Feature::Cp => Domain::Options { values: &[1, 2, 3, 4] },
            Feature::Exang | Feature::Sex | Feature::Fbs => Domain::Options { values: &[0, 1] },
            Feature::Thal => Domain::Options { values: &[1, 2, 3] },
            Feature::Ca => Domain::Options { values: &[0, 1, 2, 3] },
            Feature::Restecg | Feature::Slope => Domain::Options { values: &[0, 1, 2] },
        }
    }

    /// Value the form starts with
    pub fn default_value(&self) -> FeatureValue {
        match self {
            Feature::Age => FeatureValue::Numeric(55.0),
            Feature::Trestbps => FeatureValue::Numeric(130.0),
            Feature::Chol => FeatureValue::Numeric(245.0),
            Feature::Oldpeak => FeatureValue::Numeric(1.0),
            Feature::Thalach => FeatureValue::Numeric(150.0),
            Feature::Cp => FeatureValue::Categorical(1),
            Feature::Exang => FeatureValue::Categorical(0),
            Feature::Thal => FeatureValue::Categorical(1),
            Feature::Sex => FeatureValue::Categorical(1),
            Feature::Ca => FeatureValue::Categorical(0),
            Feature::Fbs => FeatureValue::Categorical(0),
            Feature::Restecg => FeatureValue::Categorical(0),
            Feature::Slope => FeatureValue::Categorical(1),
        }
    }

    /// Position in the default record order
    pub fn default_index(&self) -> usize {
        *self as usize
    }

    /// Convert a raw number into this field's value type
    ///
    /// Categorical codes must be integral; `2.0` is accepted as `2`.
    pub fn coerce(&self, raw: f64) -> Result<FeatureValue> {
        match self.kind() {
            FeatureKind::Numeric => Ok(FeatureValue::Numeric(raw)),
            FeatureKind::Categorical => {
                if !raw.is_finite() || raw.fract() != 0.0 {
                    return Err(Error::out_of_domain(
                        *self,
                        format!("categorical code must be an integer, got {}", raw),
                    ));
                }
                Ok(FeatureValue::Categorical(raw as i64))
            }
        }
    }

    /// Validate a value against this field's domain
    pub fn check(&self, value: FeatureValue) -> Result<()> {
        if self.domain().contains(value) {
            Ok(())
        } else {
            Err(Error::out_of_domain(
                *self,
                format!("{}, got {}", self.domain().describe(), value),
            ))
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

/// Value of a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Categorical(i64),
    Numeric(f64),
}

impl FeatureValue {
    /// The value as model input
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Numeric(v) => v,
            FeatureValue::Categorical(c) => c as f64,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Numeric(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            FeatureValue::Numeric(v) => write!(f, "{}", v),
            FeatureValue::Categorical(c) => write!(f, "{}", c),
        }
    }
}

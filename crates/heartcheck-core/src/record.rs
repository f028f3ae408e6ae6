//! Feature inputs and ordered feature records

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureValue};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};

/// The form's current values, keyed by field
///
/// Deserializes from a JSON/YAML object of wire name to number; unknown
/// names are rejected and categorical codes must be integral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, f64>",
    into = "BTreeMap<String, FeatureValue>"
)]
pub struct FeatureInputs {
    values: HashMap<Feature, FeatureValue>,
}

impl FeatureInputs {
    /// Create an empty input set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inputs holding every field's form default
    pub fn defaults() -> Self {
        Feature::ALL
            .iter()
            .map(|f| (*f, f.default_value()))
            .collect()
    }

    /// Build inputs from raw name/number pairs
    pub fn from_raw<I, K>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut inputs = Self::new();
        for (name, value) in raw {
            let feature: Feature = name.as_ref().parse()?;
            inputs.set(feature, feature.coerce(value)?);
        }
        Ok(inputs)
    }

    /// Set a field's value
    pub fn set(&mut self, feature: Feature, value: FeatureValue) -> &mut Self {
        self.values.insert(feature, value);
        self
    }

    /// Set a field's value, builder style
    pub fn with(mut self, feature: Feature, value: FeatureValue) -> Self {
        self.set(feature, value);
        self
    }

    /// Overlay another input set onto this one
    pub fn merge(&mut self, other: FeatureInputs) {
        self.values.extend(other.values);
    }

    pub fn get(&self, feature: Feature) -> Option<FeatureValue> {
        self.values.get(&feature).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, FeatureValue)> + '_ {
        self.values.iter().map(|(f, v)| (*f, *v))
    }

    /// Fields with no value, in default order
    pub fn missing(&self) -> Vec<Feature> {
        Feature::ALL
            .iter()
            .copied()
            .filter(|f| !self.values.contains_key(f))
            .collect()
    }

    /// Check every present value against its field's domain
    pub fn validate(&self) -> Result<()> {
        // Default order keeps the reported field deterministic
        for feature in Feature::ALL {
            if let Some(value) = self.get(feature) {
                feature.check(value)?;
            }
        }
        Ok(())
    }

    /// Require all thirteen fields, then check their domains
    pub fn validate_complete(&self) -> Result<()> {
        if let Some(feature) = self.missing().into_iter().next() {
            return Err(Error::MissingFeature(feature));
        }
        self.validate()
    }
}

impl FromIterator<(Feature, FeatureValue)> for FeatureInputs {
    fn from_iter<T: IntoIterator<Item = (Feature, FeatureValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<HashMap<String, f64>> for FeatureInputs {
    type Error = Error;

    fn try_from(raw: HashMap<String, f64>) -> Result<Self> {
        Self::from_raw(raw)
    }
}

impl From<FeatureInputs> for BTreeMap<String, FeatureValue> {
    fn from(inputs: FeatureInputs) -> Self {
        inputs
            .values
            .into_iter()
            .map(|(f, v)| (f.name().to_string(), v))
            .collect()
    }
}

/// Check that a declared feature order names each field exactly once
pub fn validate_order(order: &[Feature]) -> Result<()> {
    let mut seen = HashSet::with_capacity(order.len());
    for feature in order {
        if !seen.insert(*feature) {
            return Err(Error::schema(format!(
                "feature '{}' appears more than once in the declared order",
                feature
            )));
        }
    }
    if order.len() != Feature::COUNT {
        let missing: Vec<&str> = Feature::ALL
            .iter()
            .filter(|f| !seen.contains(f))
            .map(|f| f.name())
            .collect();
        return Err(Error::schema(format!(
            "declared order lists {} of {} features (missing: {})",
            order.len(),
            Feature::COUNT,
            missing.join(", ")
        )));
    }
    Ok(())
}

/// The ordered single-row input passed to a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    entries: Vec<(Feature, FeatureValue)>,
}

impl FeatureRecord {
    /// Select values from `inputs` in exactly the given order
    ///
    /// `order` must be a permutation of all features.
    pub fn from_order(inputs: &FeatureInputs, order: &[Feature]) -> Result<Self> {
        validate_order(order)?;
        let entries = order
            .iter()
            .map(|f| {
                inputs
                    .get(*f)
                    .map(|v| (*f, v))
                    .ok_or(Error::MissingFeature(*f))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Select values from `inputs` in default order
    pub fn in_default_order(inputs: &FeatureInputs) -> Result<Self> {
        Self::from_order(inputs, &Feature::ALL)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field order of this record
    pub fn features(&self) -> Vec<Feature> {
        self.entries.iter().map(|(f, _)| *f).collect()
    }

    pub fn values(&self) -> Vec<FeatureValue> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// Values as a numeric row, in record order
    pub fn as_f64_row(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| v.as_f64()).collect()
    }

    pub fn get(&self, feature: Feature) -> Option<FeatureValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Feature, FeatureValue)> {
        self.entries.iter()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (feature, value) in &self.entries {
            map.serialize_entry(feature.name(), value)?;
        }
        map.end()
    }
}

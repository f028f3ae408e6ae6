//! Display metadata for the input fields

use heartcheck_core::{Domain, Feature, FeatureKind, FeatureValue};
use serde::Serialize;

/// Everything the form needs to render one field
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FeatureKind,
    pub domain: Domain,
    pub default: FeatureValue,
}

impl From<Feature> for FeatureInfo {
    fn from(feature: Feature) -> Self {
        Self {
            name: feature.name(),
            label: feature.label(),
            help: feature.help(),
            kind: feature.kind(),
            domain: feature.domain(),
            default: feature.default_value(),
        }
    }
}

/// All fields in default order
pub fn catalogue() -> Vec<FeatureInfo> {
    Feature::ALL.iter().copied().map(FeatureInfo::from).collect()
}

//! One render cycle: inputs plus the loaded model to something to show

use heartcheck_classifiers::{predict, LoadResult, Prediction};
use heartcheck_core::{FeatureInputs, Result};

/// What a render cycle produced
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The artifact could not be loaded; show the message as a warning
    ModelUnavailable(String),

    /// The inputs were rejected before reaching the model
    InvalidInput(String),

    /// The model ran
    Predicted(Prediction),
}

/// Run one cycle against the cached load result
///
/// Incomplete or out-of-domain inputs become [`Outcome::InvalidInput`] before
/// the model is touched. Anything the adapter or classifier returns after that
/// is an error and ends the cycle.
pub fn evaluate(model: &LoadResult, inputs: &FeatureInputs) -> Result<Outcome> {
    let classifier = match model {
        LoadResult::Loaded(classifier) => classifier,
        LoadResult::Failed(message) => return Ok(Outcome::ModelUnavailable(message.clone())),
    };

    if let Err(e) = inputs.validate_complete() {
        return Ok(Outcome::InvalidInput(e.to_string()));
    }

    Ok(Outcome::Predicted(predict(inputs, classifier.as_ref())?))
}

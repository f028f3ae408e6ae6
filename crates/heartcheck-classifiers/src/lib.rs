//! HeartCheck Classifiers
//!
//! Loading pre-trained heart disease classifiers and running them on the
//! thirteen clinical inputs.
//!
//! - [`loader`]: reads a serialized artifact once per process and reports
//!   failure as a value ([`LoadResult`])
//! - [`adapter`]: orders the inputs the way the classifier expects and runs
//!   prediction plus optional probability estimation
//! - [`artifact`]: the supported serialized model types

pub mod adapter;
pub mod artifact;
pub mod classifier;
pub mod loader;

pub use adapter::{build_record, predict, Prediction};
pub use artifact::{LinearSvm, LogisticRegression, ModelArtifact, StandardScaler};
pub use classifier::{Classifier, ProbabilityEstimator};
pub use loader::{
    load_artifact, load_model, read_artifact, ArtifactFormat, LoadResult, ModelCache,
    DEFAULT_MODEL_PATH, LOAD_ERROR_PREFIX,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adapter::{predict, Prediction};
    pub use crate::classifier::{Classifier, ProbabilityEstimator};
    pub use crate::loader::{LoadResult, ModelCache};
}

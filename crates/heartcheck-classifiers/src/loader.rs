//! Classifier artifact loading and process-wide caching
//!
//! Loading never fails loudly: every problem (missing file, unreadable file,
//! bad syntax, bad schema) becomes [`LoadResult::Failed`] carrying a message
//! fit to show to the user.

use crate::artifact::ModelArtifact;
use crate::classifier::Classifier;
use heartcheck_core::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/final_model.json";

/// Prefix of every load failure message
pub const LOAD_ERROR_PREFIX: &str = "Error loading model: ";

/// Outcome of loading a classifier artifact
#[derive(Clone)]
pub enum LoadResult {
    /// The artifact was read and is ready for prediction
    Loaded(Arc<dyn Classifier>),

    /// The artifact is unavailable; the message is human readable
    Failed(String),
}

impl LoadResult {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadResult::Loaded(_))
    }

    /// The loaded classifier, if any
    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        match self {
            LoadResult::Loaded(classifier) => Some(classifier),
            LoadResult::Failed(_) => None,
        }
    }

    /// The failure message, if loading failed
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadResult::Loaded(_) => None,
            LoadResult::Failed(message) => Some(message.as_str()),
        }
    }
}

impl fmt::Debug for LoadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadResult::Loaded(classifier) => f.debug_tuple("Loaded").field(&classifier.name()).finish(),
            LoadResult::Failed(message) => f.debug_tuple("Failed").field(message).finish(),
        }
    }
}

/// Artifact serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    /// Pick the format from the file extension; anything unrecognized is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ArtifactFormat::Yaml
            }
            _ => ArtifactFormat::Json,
        }
    }
}

/// Read, parse and validate an artifact file
pub fn read_artifact(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ModelNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let artifact: ModelArtifact = match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => serde_json::from_str(&content)?,
        ArtifactFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    artifact.validate()?;

    Ok(artifact)
}

/// Load a classifier artifact, converting any failure into a message
pub fn load_artifact(path: impl AsRef<Path>) -> LoadResult {
    let path = path.as_ref();
    match read_artifact(path) {
        Ok(artifact) => {
            let classifier = artifact.into_classifier();
            info!(
                path = %path.display(),
                model = classifier.name(),
                declared_order = classifier.feature_names().is_some(),
                probability = classifier.probability().is_some(),
                "Loaded classifier artifact"
            );
            LoadResult::Loaded(classifier)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load classifier artifact");
            LoadResult::Failed(format!("{}{}", LOAD_ERROR_PREFIX, e))
        }
    }
}

/// Memoized artifact for the lifetime of the process
///
/// The first call to [`get_or_load`](ModelCache::get_or_load) reads the file;
/// every later call, from any thread, returns the same result without touching
/// the filesystem. Failures are cached as well, so a missing artifact stays
/// missing until the process restarts.
pub struct ModelCache {
    path: PathBuf,
    slot: OnceLock<LoadResult>,
}

impl ModelCache {
    /// Create an empty cache for the artifact at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: OnceLock::new(),
        }
    }

    /// Create a cache that is already initialized with `result`
    pub fn preloaded(path: impl Into<PathBuf>, result: LoadResult) -> Self {
        Self {
            path: path.into(),
            slot: OnceLock::from(result),
        }
    }

    /// The process-wide cache
    ///
    /// The first caller fixes the path; later callers get the same instance
    /// regardless of the path they pass.
    pub fn global(path: impl Into<PathBuf>) -> &'static ModelCache {
        static GLOBAL: OnceLock<ModelCache> = OnceLock::new();
        GLOBAL.get_or_init(|| ModelCache::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the artifact on first use, then return the cached result
    pub fn get_or_load(&self) -> &LoadResult {
        self.slot.get_or_init(|| {
            info!(path = %self.path.display(), "Loading classifier artifact");
            load_artifact(&self.path)
        })
    }

    /// Whether the load has already happened
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("path", &self.path)
            .field("result", &self.slot.get())
            .finish()
    }
}

/// Load the artifact at [`DEFAULT_MODEL_PATH`] through the process-wide cache
pub fn load_model() -> &'static LoadResult {
    ModelCache::global(DEFAULT_MODEL_PATH).get_or_load()
}

//! Spam Classifier Module
//!
//! Wraps the trained text model behind a stable `SpamVerdict`.
//!
//! ## Structure
//! - `vectorizer`: text -> sparse TF-IDF features
//! - `predictor`: features -> raw label (linear or naive Bayes)
//! - `artifact`: JSON model file loading
//!
//! Any failure inside the model surfaces as `ClassifierError::Unavailable`.
//! The adapter never falls back to a guessed verdict.

pub mod artifact;
pub mod predictor;
pub mod vectorizer;

use std::path::Path;
use std::sync::Arc;

use super::types::SpamVerdict;

pub use artifact::{LoadedModel, ModelArtifact};
pub use predictor::{LabelPredictor, LinearPredictor, NaiveBayesPredictor, PredictorParams};
pub use vectorizer::{FeatureVectorizer, Norm, SparseVector, TfidfVectorizer, VectorizerParams};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("inference failed: {0}")]
    Inference(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classification unavailable: {0}")]
    Unavailable(#[from] ModelError),
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Read-only, shareable across concurrent requests
#[derive(Clone)]
pub struct SpamClassifier {
    vectorizer: Arc<dyn FeatureVectorizer>,
    predictor: Arc<dyn LabelPredictor>,
}

impl SpamClassifier {
    pub fn new(vectorizer: Arc<dyn FeatureVectorizer>, predictor: Arc<dyn LabelPredictor>) -> Self {
        Self { vectorizer, predictor }
    }

    /// Load from a JSON model artifact
    pub fn from_artifact(path: &Path) -> Result<Self, ModelError> {
        let LoadedModel { vectorizer, predictor } = ModelArtifact::load(path)?.into_model()?;
        Ok(Self::new(Arc::new(vectorizer), Arc::from(predictor)))
    }

    /// Classify message text. Empty text goes to the model as-is.
    pub fn classify(&self, text: &str) -> Result<SpamVerdict, ClassifierError> {
        let features = self.vectorizer.transform(text)?;
        let label = self.predictor.predict(&features)?;
        Ok(SpamVerdict::from_label(label))
    }

    pub fn feature_count(&self) -> usize {
        self.vectorizer.dimension()
    }

    pub fn model_kind(&self) -> &'static str {
        self.predictor.kind()
    }
}

impl std::fmt::Debug for SpamClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpamClassifier")
            .field("model", &self.predictor.kind())
            .field("features", &self.vectorizer.dimension())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

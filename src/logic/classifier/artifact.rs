//! Model Artifact
//!
//! JSON file produced by the training pipeline: vectorizer + predictor.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::predictor::{LabelPredictor, PredictorParams};
use super::vectorizer::{FeatureVectorizer, TfidfVectorizer, VectorizerParams};
use super::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub vectorizer: VectorizerParams,
    pub classifier: PredictorParams,
}

/// Loaded, dimension-checked model parts
pub struct LoadedModel {
    pub vectorizer: TfidfVectorizer,
    pub predictor: Box<dyn LabelPredictor>,
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading spam model from: {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build both parts and check they agree on the feature count
    pub fn into_model(self) -> Result<LoadedModel, ModelError> {
        let vectorizer = TfidfVectorizer::from_params(self.vectorizer)?;
        let predictor = self.classifier.build()?;

        if vectorizer.dimension() != predictor.dimension() {
            return Err(ModelError::DimensionMismatch {
                expected: vectorizer.dimension(),
                found: predictor.dimension(),
            });
        }

        tracing::info!(
            "Spam model ready: {} predictor, {} features",
            predictor.kind(),
            vectorizer.dimension()
        );

        Ok(LoadedModel { vectorizer, predictor })
    }
}

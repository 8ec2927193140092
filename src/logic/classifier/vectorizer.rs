//! TF-IDF Vectorizer
//!
//! Turns message text into a sparse feature vector using the vocabulary
//! and idf weights exported by the training side.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Sparse vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Tokens of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

// ============================================================================
// TRAIT
// ============================================================================

/// Text -> features. Implementations must be stateless per call.
pub trait FeatureVectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<SparseVector, ModelError>;
    /// Number of features produced
    fn dimension(&self) -> usize;
}

// ============================================================================
// PARAMETERS (artifact section)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParams {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_lowercase() -> bool {
    true
}

// ============================================================================
// TF-IDF IMPLEMENTATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    sublinear_tf: bool,
    norm: Norm,
}

impl TfidfVectorizer {
    /// Build from artifact parameters, rejecting inconsistent dimensions
    pub fn from_params(params: VectorizerParams) -> Result<Self, ModelError> {
        if params.vocabulary.len() != params.idf.len() {
            return Err(ModelError::DimensionMismatch {
                expected: params.vocabulary.len(),
                found: params.idf.len(),
            });
        }

        if let Some((term, &index)) = params.vocabulary.iter().find(|(_, index)| **index >= params.idf.len()) {
            return Err(ModelError::InvalidArtifact(format!(
                "vocabulary term '{}' has index {} outside idf range {}",
                term,
                index,
                params.idf.len()
            )));
        }

        if params.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact("idf contains non-finite weights".to_string()));
        }

        Ok(Self {
            vocabulary: params.vocabulary,
            idf: params.idf,
            lowercase: params.lowercase,
            sublinear_tf: params.sublinear_tf,
            norm: params.norm,
        })
    }

    fn tokenize<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        TOKEN_PATTERN.find_iter(text).map(|m| m.as_str())
    }
}

impl FeatureVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector, ModelError> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        // Term counts, ordered by feature index
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.tokenize(&text) {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        if self.norm == Norm::L2 {
            let length = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if length > 0.0 {
                for (_, w) in features.iter_mut() {
                    *w /= length;
                }
            }
        }

        Ok(features)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

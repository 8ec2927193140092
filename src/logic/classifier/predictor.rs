//! Label Predictors
//!
//! Sparse features -> raw class label (1 = spam).

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseVector;
use super::ModelError;

// ============================================================================
// TRAIT
// ============================================================================

/// Trait for label predictors (linear, naive Bayes, etc.)
pub trait LabelPredictor: Send + Sync {
    fn predict(&self, features: &SparseVector) -> Result<i64, ModelError>;
    /// Number of features expected
    fn dimension(&self) -> usize;
    fn kind(&self) -> &'static str;
}

/// Predictor section of the model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredictorParams {
    Linear {
        coef: Vec<f64>,
        intercept: f64,
    },
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl PredictorParams {
    pub fn build(self) -> Result<Box<dyn LabelPredictor>, ModelError> {
        match self {
            PredictorParams::Linear { coef, intercept } => {
                Ok(Box::new(LinearPredictor::new(coef, intercept)?))
            }
            PredictorParams::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => Ok(Box::new(NaiveBayesPredictor::new(class_log_prior, feature_log_prob)?)),
        }
    }
}

fn check_feature(index: usize, dimension: usize) -> Result<(), ModelError> {
    if index >= dimension {
        return Err(ModelError::DimensionMismatch {
            expected: dimension,
            found: index + 1,
        });
    }
    Ok(())
}

// ============================================================================
// LINEAR
// ============================================================================

/// Label 1 iff `coef · x + intercept > 0`
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearPredictor {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        if coef.is_empty() {
            return Err(ModelError::InvalidArtifact("linear model has no coefficients".to_string()));
        }
        Ok(Self { coef, intercept })
    }
}

impl LabelPredictor for LinearPredictor {
    fn predict(&self, features: &SparseVector) -> Result<i64, ModelError> {
        let mut score = self.intercept;
        for &(index, weight) in features {
            check_feature(index, self.coef.len())?;
            score += self.coef[index] * weight;
        }

        if !score.is_finite() {
            return Err(ModelError::Inference(format!("non-finite decision score: {}", score)));
        }

        Ok(if score > 0.0 { 1 } else { 0 })
    }

    fn dimension(&self) -> usize {
        self.coef.len()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

// ============================================================================
// MULTINOMIAL NAIVE BAYES
// ============================================================================

/// Label 1 iff the spam joint log-likelihood is strictly higher
#[derive(Debug, Clone)]
pub struct NaiveBayesPredictor {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayesPredictor {
    pub fn new(class_log_prior: [f64; 2], feature_log_prob: [Vec<f64>; 2]) -> Result<Self, ModelError> {
        let [ham, spam] = &feature_log_prob;
        if ham.len() != spam.len() {
            return Err(ModelError::DimensionMismatch {
                expected: ham.len(),
                found: spam.len(),
            });
        }
        if ham.is_empty() {
            return Err(ModelError::InvalidArtifact("naive Bayes model has no features".to_string()));
        }
        Ok(Self {
            class_log_prior,
            feature_log_prob,
        })
    }

    fn joint_log_likelihood(&self, class: usize, features: &SparseVector) -> f64 {
        features
            .iter()
            .map(|&(index, weight)| self.feature_log_prob[class][index] * weight)
            .sum::<f64>()
            + self.class_log_prior[class]
    }
}

impl LabelPredictor for NaiveBayesPredictor {
    fn predict(&self, features: &SparseVector) -> Result<i64, ModelError> {
        for &(index, _) in features {
            check_feature(index, self.dimension())?;
        }

        let ham = self.joint_log_likelihood(0, features);
        let spam = self.joint_log_likelihood(1, features);

        if !ham.is_finite() || !spam.is_finite() {
            return Err(ModelError::Inference("non-finite log-likelihood".to_string()));
        }

        Ok(if spam > ham { 1 } else { 0 })
    }

    fn dimension(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_decision() {
        let model = LinearPredictor::new(vec![2.0, -1.0], -0.5).unwrap();
        assert_eq!(model.predict(&vec![(0, 1.0)]).unwrap(), 1);
        assert_eq!(model.predict(&vec![(1, 1.0)]).unwrap(), 0);
        // Zero score is not spam
        assert_eq!(model.predict(&vec![(0, 0.25)]).unwrap(), 0);
        assert_eq!(model.predict(&vec![]).unwrap(), 0);
    }

    #[test]
    fn test_linear_rejects_unknown_feature() {
        let model = LinearPredictor::new(vec![1.0], 0.0).unwrap();
        let err = model.predict(&vec![(3, 1.0)]).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { expected: 1, found: 4 }));
    }

    #[test]
    fn test_linear_non_finite_is_error() {
        let model = LinearPredictor::new(vec![f64::INFINITY], 0.0).unwrap();
        let err = model.predict(&vec![(0, 0.0)]).unwrap_err();
        assert!(matches!(err, ModelError::Inference(_)));
    }

    #[test]
    fn test_naive_bayes_decision() {
        let ln = |p: f64| p.ln();
        let model = NaiveBayesPredictor::new(
            [ln(0.5), ln(0.5)],
            [vec![ln(0.9), ln(0.1)], vec![ln(0.1), ln(0.9)]],
        )
        .unwrap();

        assert_eq!(model.predict(&vec![(1, 1.0)]).unwrap(), 1);
        assert_eq!(model.predict(&vec![(0, 1.0)]).unwrap(), 0);
        // Tie goes to ham
        assert_eq!(model.predict(&vec![]).unwrap(), 0);
    }

    #[test]
    fn test_naive_bayes_shape_checked() {
        let err = NaiveBayesPredictor::new([0.0, 0.0], [vec![0.0, 0.0], vec![0.0]]).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_params_tagged_deserialization() {
        let params: PredictorParams =
            serde_json::from_str(r#"{"type": "linear", "coef": [1.0], "intercept": 0.0}"#).unwrap();
        assert_eq!(params.build().unwrap().kind(), "linear");

        let params: PredictorParams = serde_json::from_str(
            r#"{"type": "multinomial_nb", "class_log_prior": [-0.1, -2.3], "feature_log_prob": [[-1.0], [-2.0]]}"#,
        )
        .unwrap();
        assert_eq!(params.build().unwrap().dimension(), 1);
    }
}

//! Risk Escalation Pipeline
//!
//! CORE STEP - one request in, one `ClassificationResult` out.
//!
//! ```text
//! sender ──► Directory ──known──► FastPath(category)
//!                │
//!             unknown
//!                ▼
//!   message ──► Classifier ──► Ham | Spam
//!                                 │
//!   identifier? ──► Breach lookup ─┴──► breached: HighRiskSpam
//!                                      clean / error / timeout: unchanged
//! ```
//!
//! Classifier failures abort the request. Breach lookup failures never do.

use std::sync::Arc;
use std::time::Duration;

use super::breach::{mask_identifier, BreachLookup, BreachLookupError};
use super::classifier::{ClassifierError, SpamClassifier};
use super::directory::SenderDirectory;
use super::types::{ClassificationResult, RiskLevel};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    ClassificationUnavailable(#[from] ClassifierError),
}

/// Outcome of the breach step, kept explicit so the recovery path is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachSignal {
    Breached,
    Clean,
    /// Lookup failed or timed out; treated as no evidence
    Unavailable,
    /// No identifier supplied
    Skipped,
}

pub struct RiskPipeline {
    directory: Arc<SenderDirectory>,
    classifier: Arc<SpamClassifier>,
    breach: Arc<dyn BreachLookup>,
    breach_timeout: Duration,
}

impl RiskPipeline {
    pub fn new(
        directory: Arc<SenderDirectory>,
        classifier: Arc<SpamClassifier>,
        breach: Arc<dyn BreachLookup>,
        breach_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            classifier,
            breach,
            breach_timeout,
        }
    }

    pub fn directory(&self) -> &SenderDirectory {
        &self.directory
    }

    pub fn classifier(&self) -> &SpamClassifier {
        &self.classifier
    }

    pub fn breach_lookup_configured(&self) -> bool {
        self.breach.is_configured()
    }

    /// Evaluate one message.
    ///
    /// Known senders return immediately without touching the classifier or
    /// the breach service. For unknown senders, breach evidence escalates
    /// the result to `HighRiskSpam` even when the classifier said Ham.
    pub async fn evaluate(
        &self,
        message: &str,
        sender: &str,
        identifier: Option<&str>,
    ) -> Result<ClassificationResult, PipelineError> {
        let category = self.directory.categorize(sender);

        if category.is_known() {
            tracing::debug!("Known sender ({}), skipping classification", category);
            return Ok(ClassificationResult::known(message.to_string(), category));
        }

        let verdict = self.classifier.classify(message).map_err(|e| {
            tracing::error!("Spam classification failed: {}", e);
            e
        })?;
        let mut risk = RiskLevel::from(verdict);

        let signal = match identifier.filter(|id| !id.is_empty()) {
            Some(id) => self.check_breach(id).await,
            None => BreachSignal::Skipped,
        };

        if signal == BreachSignal::Breached {
            risk = risk.escalate(RiskLevel::HighRiskSpam);
        }

        tracing::info!("Unknown sender: verdict={}, breach={:?}, risk={}", verdict, signal, risk);

        Ok(ClassificationResult::screened(message.to_string(), risk))
    }

    /// Single bounded attempt. Every failure degrades to `Unavailable`.
    async fn check_breach(&self, identifier: &str) -> BreachSignal {
        let lookup = tokio::time::timeout(self.breach_timeout, self.breach.is_breached(identifier));

        let result = match lookup.await {
            Ok(result) => result,
            Err(_) => Err(BreachLookupError::Timeout(self.breach_timeout)),
        };

        match result {
            Ok(true) => BreachSignal::Breached,
            Ok(false) => BreachSignal::Clean,
            Err(BreachLookupError::NotConfigured) => {
                tracing::debug!("Breach lookup not configured, skipping {}", mask_identifier(identifier));
                BreachSignal::Unavailable
            }
            Err(e) => {
                tracing::warn!(
                    "Breach lookup unavailable for {}: {} (treating as no evidence)",
                    mask_identifier(identifier),
                    e
                );
                BreachSignal::Unavailable
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::{FeatureVectorizer, LabelPredictor, ModelError, SparseVector};
    use crate::logic::directory::DirectoryConfig;
    use crate::logic::types::SenderCategory;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ------------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------------

    /// Emits one feature so the predictor always runs
    struct CountingVectorizer {
        calls: Arc<AtomicUsize>,
    }

    impl FeatureVectorizer for CountingVectorizer {
        fn transform(&self, _text: &str) -> Result<SparseVector, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![(0, 1.0)])
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    enum Model {
        Label(i64),
        Broken,
    }

    impl LabelPredictor for Model {
        fn predict(&self, _features: &SparseVector) -> Result<i64, ModelError> {
            match self {
                Model::Label(label) => Ok(*label),
                Model::Broken => Err(ModelError::Inference("session crashed".to_string())),
            }
        }
        fn dimension(&self) -> usize {
            1
        }
        fn kind(&self) -> &'static str {
            "stub"
        }
    }

    #[derive(Clone, Copy)]
    enum Lookup {
        Breached,
        Clean,
        Fails,
        Hangs,
    }

    struct StubBreach {
        behavior: Lookup,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BreachLookup for StubBreach {
        async fn is_breached(&self, _identifier: &str) -> Result<bool, BreachLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Lookup::Breached => Ok(true),
                Lookup::Clean => Ok(false),
                Lookup::Fails => Err(BreachLookupError::UnexpectedStatus(503)),
                Lookup::Hangs => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(true)
                }
            }
        }
    }

    struct Harness {
        pipeline: RiskPipeline,
        model_calls: Arc<AtomicUsize>,
        breach_calls: Arc<AtomicUsize>,
    }

    fn harness(model: Model, lookup: Lookup) -> Harness {
        let model_calls = Arc::new(AtomicUsize::new(0));
        let breach_calls = Arc::new(AtomicUsize::new(0));

        let directory = SenderDirectory::from_config(DirectoryConfig {
            personal: vec!["+919876543210".to_string()],
            bank_alert: vec!["+18005551234".to_string()],
            educational: vec!["+914001234567".to_string()],
        });

        let classifier = SpamClassifier::new(
            Arc::new(CountingVectorizer { calls: model_calls.clone() }),
            Arc::new(model),
        );

        let pipeline = RiskPipeline::new(
            Arc::new(directory),
            Arc::new(classifier),
            Arc::new(StubBreach {
                behavior: lookup,
                calls: breach_calls.clone(),
            }),
            Duration::from_millis(50),
        );

        Harness {
            pipeline,
            model_calls,
            breach_calls,
        }
    }

    // ------------------------------------------------------------------------
    // Fast path
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_known_sender_skips_everything() {
        let h = harness(Model::Label(1), Lookup::Breached);

        let result = h
            .pipeline
            .evaluate("Hi mom", "+919876543210", Some("test@example.com"))
            .await
            .unwrap();

        assert_eq!(result.category(), SenderCategory::Personal);
        assert_eq!(result.risk(), None);
        assert_eq!(result.message(), "Hi mom");
        assert_eq!(h.model_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.breach_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_known_sender_with_broken_model_still_succeeds() {
        let h = harness(Model::Broken, Lookup::Fails);
        let result = h.pipeline.evaluate("Your OTP", "+18005551234", None).await.unwrap();
        assert_eq!(result.category(), SenderCategory::BankAlert);
    }

    // ------------------------------------------------------------------------
    // Classification path
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_unknown_spam_without_identifier() {
        let h = harness(Model::Label(1), Lookup::Breached);

        let result = h.pipeline.evaluate("WIN FREE CASH NOW", "+910000000000", None).await.unwrap();

        assert_eq!(result.category(), SenderCategory::Unknown);
        assert_eq!(result.risk(), Some(RiskLevel::Spam));
        assert_eq!(h.breach_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_identifier_is_absent() {
        let h = harness(Model::Label(0), Lookup::Breached);
        let result = h.pipeline.evaluate("hello", "", Some("")).await.unwrap();
        assert_eq!(result.risk(), Some(RiskLevel::None));
        assert_eq!(h.breach_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_breach_escalates_ham() {
        let h = harness(Model::Label(0), Lookup::Breached);

        let result = h
            .pipeline
            .evaluate("Meeting at 5", "+910000000000", Some("test@example.com"))
            .await
            .unwrap();

        assert_eq!(result.risk(), Some(RiskLevel::HighRiskSpam));
        assert_eq!(h.breach_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clean_lookup_keeps_verdict() {
        let h = harness(Model::Label(1), Lookup::Clean);
        let result = h.pipeline.evaluate("WIN", "x", Some("a@b.com")).await.unwrap();
        assert_eq!(result.risk(), Some(RiskLevel::Spam));
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_verdict() {
        let h = harness(Model::Label(0), Lookup::Fails);
        let result = h.pipeline.evaluate("hello", "x", Some("a@b.com")).await.unwrap();
        assert_eq!(result.risk(), Some(RiskLevel::None));
    }

    #[tokio::test]
    async fn test_hanging_lookup_times_out_to_verdict() {
        let h = harness(Model::Label(1), Lookup::Hangs);

        let started = std::time::Instant::now();
        let result = h.pipeline.evaluate("WIN", "x", Some("a@b.com")).await.unwrap();

        assert_eq!(result.risk(), Some(RiskLevel::Spam));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_classifier_failure_is_fatal() {
        let h = harness(Model::Broken, Lookup::Breached);

        let err = h.pipeline.evaluate("hello", "x", Some("a@b.com")).await.unwrap_err();

        assert!(matches!(err, PipelineError::ClassificationUnavailable(_)));
        assert_eq!(h.breach_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_evaluate_is_idempotent() {
        let h = harness(Model::Label(1), Lookup::Clean);
        let first = h.pipeline.evaluate("WIN", "x", Some("a@b.com")).await.unwrap();
        let second = h.pipeline.evaluate("WIN", "x", Some("a@b.com")).await.unwrap();
        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    proptest! {
        #[test]
        fn breach_always_yields_high_risk(label in 0i64..=1, message in ".{0,40}") {
            let h = harness(Model::Label(label), Lookup::Breached);
            let result = tokio_test::block_on(h.pipeline.evaluate(&message, "+910000000000", Some("a@b.com"))).unwrap();
            prop_assert_eq!(result.risk(), Some(RiskLevel::HighRiskSpam));
        }

        #[test]
        fn failed_lookup_equals_base_verdict(label in 0i64..=1) {
            let h = harness(Model::Label(label), Lookup::Fails);
            let result = tokio_test::block_on(h.pipeline.evaluate("msg", "+910000000000", Some("a@b.com"))).unwrap();
            let expected = if label == 1 { RiskLevel::Spam } else { RiskLevel::None };
            prop_assert_eq!(result.risk(), Some(expected));
        }

        #[test]
        fn known_senders_never_carry_prediction(
            sender in prop::sample::select(vec!["+919876543210", "+18005551234", "+914001234567"]),
            message in ".{0,40}",
        ) {
            let h = harness(Model::Label(1), Lookup::Breached);
            let result = tokio_test::block_on(h.pipeline.evaluate(&message, sender, Some("a@b.com"))).unwrap();
            prop_assert!(result.category().is_known());
            prop_assert_eq!(result.risk(), None);
        }

        #[test]
        fn unknown_senders_always_carry_prediction(sender in "[0-9]{3,10}") {
            let h = harness(Model::Label(0), Lookup::Clean);
            let result = tokio_test::block_on(h.pipeline.evaluate("msg", &sender, None)).unwrap();
            prop_assert_eq!(result.category(), SenderCategory::Unknown);
            prop_assert!(result.risk().is_some());
        }
    }
}

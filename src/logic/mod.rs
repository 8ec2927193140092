//! Logic Module - Risk Classification
//!
//! ## Structure
//! - `types`: SenderCategory, SpamVerdict, RiskLevel, ClassificationResult
//! - `directory`: sender -> category lookup
//! - `classifier`: text model adapter (TF-IDF + predictor)
//! - `breach`: breach lookup capability and HIBP client
//! - `pipeline`: orchestration and escalation

pub mod breach;
pub mod classifier;
pub mod directory;
pub mod pipeline;
pub mod types;

pub use breach::{BreachLookup, BreachLookupError, HibpClient, HibpConfig};
pub use classifier::{ClassifierError, ModelError, SpamClassifier};
pub use directory::{DirectoryConfig, SenderDirectory};
pub use pipeline::{BreachSignal, PipelineError, RiskPipeline};
pub use types::{ClassificationResult, RiskLevel, SenderCategory, SpamVerdict};

//! Risk Types
//!
//! Core types for sender categorization and spam risk.
//! No logic here - only data structures and their wire names.

use serde::{Deserialize, Serialize};

// ============================================================================
// SENDER CATEGORY
// ============================================================================

/// Category derived from the sender identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenderCategory {
    Personal,
    #[serde(rename = "Bank Alert")]
    BankAlert,
    Educational,
    Unknown,
}

impl SenderCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderCategory::Personal => "Personal",
            SenderCategory::BankAlert => "Bank Alert",
            SenderCategory::Educational => "Educational",
            SenderCategory::Unknown => "Unknown",
        }
    }

    /// Known senders skip classification and breach lookup entirely
    pub fn is_known(&self) -> bool {
        !matches!(self, SenderCategory::Unknown)
    }
}

impl std::fmt::Display for SenderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SPAM VERDICT (from classifier)
// ============================================================================

/// Binary classifier output before any escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpamVerdict {
    Ham,
    Spam,
}

impl SpamVerdict {
    /// Map a raw model label. Only `1` means spam.
    pub fn from_label(label: i64) -> Self {
        if label == 1 {
            SpamVerdict::Spam
        } else {
            SpamVerdict::Ham
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpamVerdict::Ham => "Ham",
            SpamVerdict::Spam => "Spam",
        }
    }
}

impl std::fmt::Display for SpamVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Final risk for unknown senders.
///
/// Variants are declared in ascending severity so the derived `Ord` is the
/// escalation lattice: `None < Spam < HighRiskSpam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Ham")]
    None,
    Spam,
    #[serde(rename = "High-Risk Spam (Leaked Email/Phone Found)")]
    HighRiskSpam,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "Ham",
            RiskLevel::Spam => "Spam",
            RiskLevel::HighRiskSpam => "High-Risk Spam (Leaked Email/Phone Found)",
        }
    }

    /// Raise to `other` if it is more severe. Never lowers.
    pub fn escalate(self, other: RiskLevel) -> RiskLevel {
        self.max(other)
    }
}

impl From<SpamVerdict> for RiskLevel {
    fn from(verdict: SpamVerdict) -> Self {
        match verdict {
            SpamVerdict::Ham => RiskLevel::None,
            SpamVerdict::Spam => RiskLevel::Spam,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Result of one pipeline evaluation.
///
/// `prediction` is present iff the category is `Unknown`; the two
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    message: String,
    category: SenderCategory,
    #[serde(rename = "prediction", skip_serializing_if = "Option::is_none")]
    risk: Option<RiskLevel>,
}

impl ClassificationResult {
    /// Result for a sender found in the directory
    pub(crate) fn known(message: String, category: SenderCategory) -> Self {
        debug_assert!(category.is_known());
        Self {
            message,
            category,
            risk: None,
        }
    }

    /// Result for an unknown sender after screening
    pub(crate) fn screened(message: String, risk: RiskLevel) -> Self {
        Self {
            message,
            category: SenderCategory::Unknown,
            risk: Some(risk),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> SenderCategory {
        self.category
    }

    pub fn risk(&self) -> Option<RiskLevel> {
        self.risk
    }
}

// ============================================================================
// TESTS
// ============================================================================

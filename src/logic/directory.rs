//! Sender Directory
//!
//! Static membership lookup: sender identifier -> SenderCategory.
//! Exact string equality only. Phone numbers are NOT normalized (no E.164),
//! so "+919876543210" and "9876543210" are different senders.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::SenderCategory;
use crate::config::ConfigError;

// ============================================================================
// CONFIG
// ============================================================================

/// Membership lists as loaded from the directory file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub personal: Vec<String>,
    #[serde(default)]
    pub bank_alert: Vec<String>,
    #[serde(default)]
    pub educational: Vec<String>,
}

impl DirectoryConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

// ============================================================================
// DIRECTORY
// ============================================================================

/// Read-only after construction, safe to share between requests
#[derive(Debug, Clone, Default)]
pub struct SenderDirectory {
    personal: HashSet<String>,
    bank_alert: HashSet<String>,
    educational: HashSet<String>,
}

impl SenderDirectory {
    pub fn from_config(config: DirectoryConfig) -> Self {
        let directory = Self {
            personal: config.personal.into_iter().collect(),
            bank_alert: config.bank_alert.into_iter().collect(),
            educational: config.educational.into_iter().collect(),
        };

        let overlaps = directory.overlap_count();
        if overlaps > 0 {
            tracing::warn!(
                "Sender directory has {} identifiers in more than one list; first match wins (Personal > Bank Alert > Educational)",
                overlaps
            );
        }

        directory
    }

    /// Categorize a sender. Priority: Personal > Bank Alert > Educational.
    pub fn categorize(&self, sender: &str) -> SenderCategory {
        if self.personal.contains(sender) {
            SenderCategory::Personal
        } else if self.bank_alert.contains(sender) {
            SenderCategory::BankAlert
        } else if self.educational.contains(sender) {
            SenderCategory::Educational
        } else {
            SenderCategory::Unknown
        }
    }

    /// Total entries across all lists
    pub fn len(&self) -> usize {
        self.personal.len() + self.bank_alert.len() + self.educational.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn overlap_count(&self) -> usize {
        let bank_overlap = self
            .bank_alert
            .iter()
            .filter(|s| self.personal.contains(*s))
            .count();
        let edu_overlap = self
            .educational
            .iter()
            .filter(|s| self.personal.contains(*s) || self.bank_alert.contains(*s))
            .count();
        bank_overlap + edu_overlap
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Breach Lookup Module
//!
//! Checks whether a contact identifier (email or phone) appears in a known
//! data-exposure incident.
//!
//! # Components
//! - `hibp.rs`: Have I Been Pwned v3 client

pub mod hibp;

use async_trait::async_trait;

pub use hibp::{HibpClient, HibpConfig};

// ============================================================================
// ERRORS
// ============================================================================

/// Lookup failures. The pipeline treats all of these as "no evidence".
#[derive(Debug, thiserror::Error)]
pub enum BreachLookupError {
    #[error("breach lookup not configured (missing API key)")]
    NotConfigured,

    #[error("breach service rejected the API key")]
    Unauthorized,

    #[error("breach service rate limited, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },

    #[error("breach service returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("breach lookup timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("invalid breach service URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),
}

// ============================================================================
// TRAIT
// ============================================================================

#[async_trait]
pub trait BreachLookup: Send + Sync {
    /// `Ok(true)` if the identifier appears in at least one breach
    async fn is_breached(&self, identifier: &str) -> Result<bool, BreachLookupError>;

    /// Whether this lookup can produce evidence at all
    fn is_configured(&self) -> bool {
        true
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Mask an identifier for logs: `te***@example.com`, `+91******3210`
pub fn mask_identifier(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();

    if let Some(at) = identifier.find('@') {
        let local: Vec<char> = identifier[..at].chars().collect();
        let keep = local.len().min(2);
        let visible: String = local[..keep].iter().collect();
        return format!("{}***{}", visible, &identifier[at..]);
    }

    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let head = if chars.len() > 8 { 3 } else { 0 };
    let tail = 4;
    let hidden = chars.len() - head - tail;
    format!(
        "{}{}{}",
        chars[..head].iter().collect::<String>(),
        "*".repeat(hidden),
        chars[chars.len() - tail..].iter().collect::<String>()
    )
}

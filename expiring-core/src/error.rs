//! Error types for the expiring cache.
//!
//! These cover configuration only. Failures raised by a refresh function
//! keep their own type and reach the caller untouched.

use thiserror::Error;

/// Result type alias using `CacheError`.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors raised while building or configuring a cache.
#[derive(Debug, Error)]
pub enum CacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A configuration value is out of range.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CacheError {
    /// Returns true if the configuration source itself was unreadable.
    pub fn is_config_error(&self) -> bool {
        matches!(self, CacheError::JsonError(_))
    }
}

//! Security utilities for secret resolution
//!
//! Provides:
//! - SecureString with zeroize
//! - Redaction of values before they reach a log line

use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Logged in place of values too short to fingerprint
pub const REDACTED_PLACEHOLDER: &str = "#######";

/// Joins the revealed head and tail of a redacted value
const REDACTED_SEPARATOR: &str = "###";

/// Values up to this many characters reveal nothing
const REVEAL_THRESHOLD: usize = 8;

/// Characters revealed at each end of a longer value
const REVEAL_CHARS: usize = 2;

/// A secure string that is automatically zeroed on drop
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Get the string value (use with caution)
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString([REDACTED {} bytes])", self.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Produce a safe-to-log fingerprint of a sensitive value
///
/// Values of at most 8 characters become a fixed placeholder. Longer values
/// keep their first and last two characters. This is a debugging aid, not a
/// security boundary: the raw value must still never be logged.
pub fn redact(value: &str) -> String {
    let len = value.chars().count();
    if len <= REVEAL_THRESHOLD {
        return REDACTED_PLACEHOLDER.to_string();
    }

    let head: String = value.chars().take(REVEAL_CHARS).collect();
    let tail: String = value.chars().skip(len - REVEAL_CHARS).collect();
    format!("{head}{REDACTED_SEPARATOR}{tail}")
}

/// Log a resolved entry at debug level, redacted, with its true length
pub fn log_resolved(entry_key: &str, value: &str) {
    debug!(
        key = %entry_key,
        val = %redact(value),
        length = value.chars().count(),
        "found secret"
    );
}

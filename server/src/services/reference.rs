//! Complaint reference-number generation.
//!
//! DESIGN
//! ======
//! A reference is `CMP-<unix millis>-<0..1000 random>`. Nothing is checked
//! against previously issued numbers, so two requests in the same
//! millisecond can collide.
//!
//! ERROR HANDLING
//! ==============
//! `generate` never fails. Clock or entropy failures are logged and the
//! caller receives a [`ReferenceNumber::Degraded`] value of the form
//! `TEMP-<unix millis>` instead.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::TryRngCore;
use rand::rngs::OsRng;

pub const PRIMARY_PREFIX: &str = "CMP";
pub const FALLBACK_PREFIX: &str = "TEMP";
/// Exclusive upper bound of the random suffix.
pub const RANDOM_BOUND: u32 = 1000;

/// Errors produced while building a primary reference.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The system clock reads earlier than the Unix epoch.
    #[error("system clock is before the unix epoch")]
    ClockBeforeEpoch,

    /// The random source could not produce a value.
    #[error("entropy unavailable: {0}")]
    Entropy(String),
}

/// Source of the two inputs a reference is built from.
pub trait RefSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> Result<u64, ReferenceError>;

    /// A random integer in `[0, bound)`.
    fn random_below(&self, bound: u32) -> Result<u32, ReferenceError>;
}

/// Wall clock plus the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl RefSource for SystemSource {
    fn now_millis(&self) -> Result<u64, ReferenceError> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ReferenceError::ClockBeforeEpoch)?;
        Ok(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    fn random_below(&self, bound: u32) -> Result<u32, ReferenceError> {
        let raw = OsRng
            .try_next_u32()
            .map_err(|e| ReferenceError::Entropy(e.to_string()))?;
        Ok(raw % bound.max(1))
    }
}

/// Outcome of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceNumber {
    /// Normal `CMP-<millis>-<random>` reference.
    Issued(String),
    /// Fallback `TEMP-<millis>` reference after an internal failure.
    Degraded(String),
}

impl ReferenceNumber {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Issued(s) | Self::Degraded(s) => s,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Issued(s) | Self::Degraded(s) => s,
        }
    }
}

/// Build a primary reference, propagating any input failure.
///
/// # Errors
///
/// Returns the first [`ReferenceError`] raised by `source`.
pub fn try_generate(source: &dyn RefSource) -> Result<String, ReferenceError> {
    let timestamp = source.now_millis()?;
    let random = source.random_below(RANDOM_BOUND)?;
    Ok(format!("{PRIMARY_PREFIX}-{timestamp}-{random}"))
}

/// Build a reference, degrading to the fallback format on failure.
pub fn generate(source: &dyn RefSource) -> ReferenceNumber {
    match try_generate(source) {
        Ok(reference) => ReferenceNumber::Issued(reference),
        Err(e) => {
            tracing::warn!(error = %e, "reference generation failed; issuing fallback");
            let timestamp = source.now_millis().unwrap_or(0);
            ReferenceNumber::Degraded(format!("{FALLBACK_PREFIX}-{timestamp}"))
        }
    }
}

#[cfg(test)]
#[path = "reference_test.rs"]
mod tests;

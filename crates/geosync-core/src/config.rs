// crates/geosync-core/src/config.rs
use crate::error::{GeoSyncError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acceptance cutoff for fuzzy matches, validated to `50..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Threshold(u8);

impl Threshold {
    pub const MIN: u8 = 50;
    pub const MAX: u8 = 100;
    pub const DEFAULT: Threshold = Threshold(85);

    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Threshold(value as u8))
        } else {
            Err(GeoSyncError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether a similarity score reaches this threshold.
    #[inline]
    pub fn accepts(self, score: f64) -> bool {
        score >= f64::from(self.0)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Threshold {
    type Error = GeoSyncError;

    fn try_from(value: i64) -> Result<Self> {
        Threshold::new(value)
    }
}

impl From<Threshold> for i64 {
    fn from(t: Threshold) -> Self {
        i64::from(t.0)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tunables of the resolver and the batch reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Cutoff for the word-prefix shortcut and the global fuzzy tier.
    pub threshold: Threshold,
    /// Maximum number of word-prefix candidates kept per row.
    pub word_limit: usize,
    /// Number of global fuzzy candidates considered.
    pub top_k: usize,
    /// Scores at or above this are reported as exact matches.
    pub exact_score: f64,
    /// Rows scoring at or below this are offered for manual review.
    pub review_max_score: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            word_limit: 20,
            top_k: 10,
            exact_score: 95.0,
            review_max_score: 90.0,
        }
    }
}

impl MatchConfig {
    /// Default configuration with a validated threshold.
    pub fn with_threshold(threshold: i64) -> Result<Self> {
        Ok(Self {
            threshold: Threshold::new(threshold)?,
            ..Self::default()
        })
    }
}

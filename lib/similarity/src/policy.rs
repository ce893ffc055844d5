//! Match policy
//!
//! The gate thresholds and histogram parameters used by a matching run.
//! Defaults reproduce the production gates: breed >= 50, embedding >= 0,
//! color > 0.

use crate::histogram::{ColorHistogram, DEFAULT_HISTOGRAM_BINS, DEFAULT_HISTOGRAM_SIZE};
use serde::{Deserialize, Serialize};

/// Gate thresholds and feature parameters for the pairwise matcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchPolicy {
    /// Pairs with breed similarity below this are rejected before any image math
    #[serde(default = "default_breed_threshold")]
    pub breed_threshold: u8,

    /// Raw embedding similarity must be `>=` this
    #[serde(default)]
    pub embedding_floor: f32,

    /// Color similarity must be strictly `>` this
    #[serde(default)]
    pub color_floor: u8,

    /// Side length the histogram builder resamples to
    #[serde(default = "default_histogram_size")]
    pub histogram_size: u32,

    /// Bins per color channel
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_breed_threshold() -> u8 {
    50
}

fn default_histogram_size() -> u32 {
    DEFAULT_HISTOGRAM_SIZE
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            breed_threshold: default_breed_threshold(),
            embedding_floor: 0.0,
            color_floor: 0,
            histogram_size: default_histogram_size(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl MatchPolicy {
    /// Validate thresholds and histogram parameters
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.breed_threshold > 100 {
            return Err(PolicyError::ThresholdOutOfRange("breed_threshold"));
        }
        if !(-100.0..=100.0).contains(&self.embedding_floor) {
            return Err(PolicyError::ThresholdOutOfRange("embedding_floor"));
        }
        if self.color_floor > 100 {
            return Err(PolicyError::ThresholdOutOfRange("color_floor"));
        }
        if self.histogram_size == 0 {
            return Err(PolicyError::ZeroHistogramSize);
        }
        if self.histogram_bins == 0 || 256 % self.histogram_bins != 0 {
            return Err(PolicyError::InvalidBinCount(self.histogram_bins));
        }
        Ok(())
    }

    pub fn histogram(&self) -> ColorHistogram {
        ColorHistogram::new(self.histogram_size, self.histogram_bins)
    }
}

/// Errors that can occur during policy validation
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Threshold '{0}' is outside its valid range")]
    ThresholdOutOfRange(&'static str),

    #[error("Histogram size cannot be zero")]
    ZeroHistogramSize,

    #[error("Histogram bin count {0} must be non-zero and divide 256")]
    InvalidBinCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = MatchPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.breed_threshold, 50);
        assert_eq!(policy.histogram().len(), 48);
    }

    #[test]
    fn test_invalid_bins() {
        let policy = MatchPolicy {
            histogram_bins: 12,
            ..MatchPolicy::default()
        };
        assert_eq!(policy.validate(), Err(PolicyError::InvalidBinCount(12)));
    }

    #[test]
    fn test_threshold_range() {
        let policy = MatchPolicy {
            breed_threshold: 101,
            ..MatchPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::ThresholdOutOfRange("breed_threshold"))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let policy: MatchPolicy = serde_json::from_str(r#"{ "color_floor": 10 }"#).unwrap();
        assert_eq!(policy.color_floor, 10);
        assert_eq!(policy.breed_threshold, 50);
        assert_eq!(policy.histogram_bins, 16);
    }
}

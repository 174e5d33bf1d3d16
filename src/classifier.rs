//! Uniqueness classification of digit buffers.
//!
//! A buffer is unique when exactly one partition reads as four valid
//! octets. Cheap structural checks settle the common long and short cases;
//! everything else falls back to counting valid partitions.

use std::fmt;

use crate::digits::DigitBuffer;
use crate::partition::{enumerate_partitions, is_valid};

/// Outcome of classifying a digit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Exactly one dotted-quad reading
    Unique,
    /// More than one dotted-quad reading
    Ambiguous,
}

impl Classification {
    pub fn is_unique(self) -> bool {
        self == Classification::Unique
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Unique => write!(f, "unique"),
            Classification::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Errors raised by classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// No partition reads as four valid octets. Never happens for a buffer
    /// encoded from an address.
    #[error("Failed to parse address: {digits:?} has no valid dotted-quad reading")]
    NoValidPartition { digits: String },
}

/// Classify a buffer, trying the structural shortcuts first.
pub fn classify(digits: &DigitBuffer) -> Result<Classification, ClassifyError> {
    if unique_by_heuristics(digits) {
        return Ok(Classification::Unique);
    }
    classify_exhaustive(digits)
}

/// Classify a buffer by counting every valid partition.
pub fn classify_exhaustive(digits: &DigitBuffer) -> Result<Classification, ClassifyError> {
    match valid_partition_count(digits) {
        0 => Err(ClassifyError::NoValidPartition {
            digits: digits.to_string(),
        }),
        1 => Ok(Classification::Unique),
        _ => Ok(Classification::Ambiguous),
    }
}

/// Number of partitions of `digits` that read as four valid octets.
pub fn valid_partition_count(digits: &DigitBuffer) -> usize {
    enumerate_partitions(digits.logical_length())
        .filter(|partition| is_valid(digits, partition))
        .count()
}

/// Shortcuts that prove uniqueness without enumerating partitions.
///
/// Only meaningful for buffers encoded from an address: twelve digits allow
/// only 3+3+3+3 and four digits only 1+1+1+1. Eleven digits split as three
/// 3-digit octets and one 2-digit octet, so a 3-digit window over 255 at
/// either end pins the 2-digit octet to that end.
pub fn unique_by_heuristics(digits: &DigitBuffer) -> bool {
    match digits.logical_length() {
        12 | 4 => true,
        11 => {
            let slice = digits.as_slice();
            window_value(&slice[0..3]) > 255 || window_value(&slice[8..11]) > 255
        }
        _ => false,
    }
}

/// Value of a 3-digit window stored least-significant first.
fn window_value(window: &[u8]) -> u16 {
    window
        .iter()
        .rev()
        .fold(0, |acc, &digit| acc * 10 + u16::from(digit))
}

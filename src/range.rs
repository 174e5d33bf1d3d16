//! Closed address ranges and their static division among workers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed range `[start, end]` of 32-bit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRange {
    pub start: u32,
    pub end: u32,
}

impl AddressRange {
    /// The whole 32-bit address space
    pub const FULL: AddressRange = AddressRange {
        start: u32::MIN,
        end: u32::MAX,
    };

    /// Build a range, returning `None` when `start > end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Number of addresses covered
    pub fn len(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    /// A closed range always holds at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.start..=self.end).contains(&value)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Divide into `parts` contiguous sub-ranges of equal size.
    ///
    /// The last sub-range absorbs the remainder. `parts` is clamped to
    /// `1..=len` so that no sub-range is empty.
    pub fn split(&self, parts: usize) -> Vec<AddressRange> {
        let parts = (parts as u64).clamp(1, self.len());
        let chunk = self.len() / parts;

        (0..parts)
            .map(|index| {
                let start = u64::from(self.start) + chunk * index;
                let end = if index + 1 == parts {
                    u64::from(self.end)
                } else {
                    start + chunk - 1
                };
                // both bounds stay within [self.start, self.end]
                AddressRange {
                    start: start as u32,
                    end: end as u32,
                }
            })
            .collect()
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}..={:08x}", self.start, self.end)
    }
}

/// Parse an address bound written in decimal or as `0x`-prefixed hex.
pub fn parse_address(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|e| format!("Invalid address '{}': {}", text, e))
}

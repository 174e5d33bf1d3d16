//! Partition enumeration.

use std::fmt;

/// Lengths of the four parts, lowest digit index first.
///
/// Part 0 covers the least-significant digits, which print as the last
/// octet of the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition([u8; 4]);

impl Partition {
    /// Build a partition, rejecting any part outside `1..=3`.
    pub fn new(parts: [u8; 4]) -> Option<Self> {
        parts
            .iter()
            .all(|part| (1..=3).contains(part))
            .then_some(Self(parts))
    }

    pub fn parts(&self) -> [u8; 4] {
        self.0
    }

    /// Number of digits covered
    pub fn total_len(&self) -> usize {
        self.0.iter().map(|&part| part as usize).sum()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({}, {}, {}, {})", a, b, c, d)
    }
}

/// Every partition of `length` digits into four parts of one to three digits.
///
/// The first three parts are iterated in nested order with the third
/// innermost; the fourth takes whatever remains. At most 27 candidates are
/// produced and each call starts a fresh sequence.
pub fn enumerate_partitions(length: usize) -> impl Iterator<Item = Partition> {
    (1u8..=3).flat_map(move |i| {
        (1u8..=3).flat_map(move |j| {
            (1u8..=3).filter_map(move |k| {
                let rest = length.checked_sub(usize::from(i + j + k))?;
                (1..=3)
                    .contains(&rest)
                    .then(|| Partition([i, j, k, rest as u8]))
            })
        })
    })
}

//! Octet validation for a candidate partition.

use crate::digits::DigitBuffer;

use super::enumerator::Partition;

/// Largest value an octet may take.
const OCTET_MAX: u16 = 255;

/// Check that every part of `partition` reads as a canonical octet.
///
/// Parts are consumed from index 0 upward. A part longer than one digit is
/// rejected when its highest-index digit is zero, since that digit prints
/// first and would be a leading zero. A part whose value exceeds 255 is
/// rejected. A partition that does not cover the buffer exactly is never
/// valid.
pub fn is_valid(digits: &DigitBuffer, partition: &Partition) -> bool {
    let slice = digits.as_slice();
    if partition.total_len() != slice.len() {
        return false;
    }

    let mut offset = 0;
    for part in partition.parts() {
        let part = usize::from(part);
        let octet = &slice[offset..offset + part];
        offset += part;

        if part > 1 && octet[part - 1] == 0 {
            return false;
        }

        let value = octet
            .iter()
            .rev()
            .fold(0u16, |acc, &digit| acc * 10 + u16::from(digit));
        if value > OCTET_MAX {
            return false;
        }
    }

    true
}

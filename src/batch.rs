//! Sequential unique counting over one address range.

use std::io::Write;

use color_eyre::eyre::{Context, Result};

use crate::classifier::classify;
use crate::digits::DigitBuffer;
use crate::range::AddressRange;

/// Count the unique addresses in `range`, visiting them in increasing order.
///
/// When a sink is given, every unique address is written to it as its
/// separator-free digit string, one per line, in visiting order.
pub fn count_uniques(range: AddressRange, mut sink: Option<&mut dyn Write>) -> Result<u64> {
    let mut unique_count = 0u64;

    for value in range.iter() {
        let digits = DigitBuffer::encode(value);
        let classification = classify(&digits)
            .wrap_err_with(|| format!("Failed to classify address {:#010x}", value))?;

        if classification.is_unique() {
            unique_count += 1;
            if let Some(sink) = sink.as_mut() {
                writeln!(sink, "{}", digits)
                    .wrap_err_with(|| format!("Failed to log unique address {}", digits))?;
            }
        }
    }

    Ok(unique_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_small_ranges() {
        // 0.0.0.0 to 0.0.0.9 all have four digits
        assert_eq!(count_uniques(AddressRange::new(0, 9).unwrap(), None).unwrap(), 10);
        // 0.0.0.10 reads only as 0.0.0.10, 0.0.1.0 would need "0010"
        assert_eq!(count_uniques(AddressRange::new(10, 10).unwrap(), None).unwrap(), 1);
        // 0.0.1.10 is also 0.0.11.0
        assert_eq!(count_uniques(AddressRange::new(266, 266).unwrap(), None).unwrap(), 0);
    }

    #[test]
    fn test_sink_receives_uniques_in_order() {
        let range = AddressRange::new(0, 300).unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let count = count_uniques(range, Some(&mut sink)).unwrap();

        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len() as u64, count);
        assert_eq!(&lines[..3], &["0000", "0001", "0002"]);
        assert!(!lines.contains(&"00110"));

        let expected: Vec<String> = range
            .iter()
            .map(DigitBuffer::encode)
            .filter(|d| classify(d).unwrap().is_unique())
            .map(|d| d.to_string())
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_sink_and_no_sink_agree() {
        let range = AddressRange::new(0x0100_0000, 0x0100_0fff).unwrap();
        let mut sink = std::io::sink();
        assert_eq!(
            count_uniques(range, Some(&mut sink)).unwrap(),
            count_uniques(range, None).unwrap()
        );
    }
}

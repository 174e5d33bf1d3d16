//! Digit codec for dotted-quad digit strings.
//!
//! A [`DigitBuffer`] holds the decimal digits of an address with every
//! separator removed. Digits are stored least-significant first, so index 0
//! is the last printed digit and the most-significant octet occupies the
//! highest indices.

use std::fmt;
use std::str::FromStr;

/// Maximum number of digits a buffer can hold.
pub const CAPACITY: usize = 12;

/// Errors raised while decoding a digit string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigitError {
    #[error("Invalid digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("Digit string has {len} digits, more than fit in a buffer")]
    TooLong { len: usize },
}

/// Fixed-capacity digit buffer with an explicit logical length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitBuffer {
    digits: [u8; CAPACITY],
    len: u8,
}

impl DigitBuffer {
    /// Empty buffer
    pub const fn new() -> Self {
        Self {
            digits: [0; CAPACITY],
            len: 0,
        }
    }

    /// Encode an address as the concatenation of its four canonical octets.
    ///
    /// The least-significant octet is written first, so reading the buffer
    /// from the highest index down yields the familiar `a.b.c.d` order
    /// without the dots.
    pub fn encode(value: u32) -> Self {
        let mut buffer = Self::new();
        for octet in value.to_le_bytes() {
            buffer.push(octet % 10);
            if octet >= 10 {
                buffer.push(octet / 10 % 10);
            }
            if octet >= 100 {
                buffer.push(octet / 100);
            }
        }
        buffer
    }

    /// Decode an arbitrary digit string such as `"124163241225"`.
    pub fn decode(text: &str) -> Result<Self, DigitError> {
        let len = text.chars().count();
        if len > CAPACITY {
            return Err(DigitError::TooLong { len });
        }

        let mut buffer = Self::new();
        for (offset, ch) in text.chars().rev().enumerate() {
            let position = len - 1 - offset;
            let digit = ch
                .to_digit(10)
                .ok_or(DigitError::InvalidDigit { ch, position })?;
            buffer.push(digit as u8);
        }
        Ok(buffer)
    }

    /// Number of meaningful digits
    pub fn logical_length(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Meaningful digits in storage order (least-significant first).
    pub fn as_slice(&self) -> &[u8] {
        &self.digits[..self.logical_length()]
    }

    /// Digit at `index`, or `None` past the logical length.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_slice().get(index).copied()
    }

    fn push(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        self.digits[self.logical_length()] = digit;
        self.len += 1;
    }
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u32> for DigitBuffer {
    fn from(value: u32) -> Self {
        Self::encode(value)
    }
}

impl FromStr for DigitBuffer {
    type Err = DigitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.as_slice().iter().rev() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        // 1.20.255.0 -> "1202550", stored reversed
        let value = u32::from_be_bytes([1, 20, 255, 0]);
        let buffer = DigitBuffer::encode(value);
        assert_eq!(buffer.logical_length(), 7);
        assert_eq!(buffer.as_slice(), &[0, 5, 5, 2, 0, 2, 1]);
        assert_eq!(buffer.to_string(), "1202550");
    }

    #[test]
    fn test_encode_extremes() {
        assert_eq!(DigitBuffer::encode(0).to_string(), "0000");
        assert_eq!(DigitBuffer::encode(0).logical_length(), 4);
        assert_eq!(DigitBuffer::encode(u32::MAX).to_string(), "255255255255");
        assert_eq!(DigitBuffer::encode(u32::MAX).logical_length(), 12);
    }

    #[test]
    fn test_encode_drops_leading_zeros_per_octet() {
        let value = u32::from_be_bytes([100, 10, 1, 50]);
        assert_eq!(DigitBuffer::encode(value).to_string(), "10010150");
    }

    #[test]
    fn test_decode() {
        let buffer: DigitBuffer = "00123".parse().unwrap();
        assert_eq!(buffer.logical_length(), 5);
        assert_eq!(buffer.as_slice(), &[3, 2, 1, 0, 0]);
        assert_eq!(buffer.to_string(), "00123");
        assert_eq!(buffer.get(4), Some(0));
        assert_eq!(buffer.get(5), None);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            DigitBuffer::decode("12a4"),
            Err(DigitError::InvalidDigit { ch: 'a', position: 2 })
        );
        assert_eq!(
            DigitBuffer::decode("1234567890123"),
            Err(DigitError::TooLong { len: 13 })
        );
        assert!(DigitBuffer::decode("").unwrap().is_empty());
        assert_eq!(DigitBuffer::decode("123456789012").unwrap().logical_length(), 12);
    }

    #[test]
    fn test_round_trip_sampled() {
        for value in (0..=u32::MAX).step_by(7919 * 13) {
            let encoded = DigitBuffer::encode(value);
            let decoded = DigitBuffer::decode(&encoded.to_string()).unwrap();
            assert_eq!(decoded, encoded, "round trip failed for {:#010x}", value);
        }
    }
}

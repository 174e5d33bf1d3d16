//! Four-way segmentation of a digit buffer into octet candidates.
//!
//! The enumerator lists every combination of part lengths that covers a
//! buffer exactly; the validator decides whether a combination reads as
//! four well-formed octets.

pub mod enumerator;
pub mod validator;

// Re-export commonly used items
pub use enumerator::{enumerate_partitions, Partition};
pub use validator::is_valid;

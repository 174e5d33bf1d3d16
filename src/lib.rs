//! # IpCrunch - Dotted-quad ambiguity counter
//!
//! Strip the dots from an IPv4 address and the digit string that remains
//! may no longer say which address it came from: `1.1.1.11` and `1.1.11.1`
//! both become `11111`. This library decides, for every 32-bit address,
//! whether its separator-free digit string reads back as exactly one
//! address ("unique") or as several ("ambiguous"), and counts the unique
//! ones across any range of the address space.
//!
//! ## Architecture
//!
//! - `digits`: digit buffer codec (address or digit string to buffer and back)
//! - `partition`: enumeration and validation of four-part segmentations
//! - `classifier`: structural shortcuts plus the full partition count
//! - `range`: closed address ranges and their static division
//! - `batch`: sequential counting over one range, with an optional line sink
//! - `scheduler`: parallel counting with one rayon worker per sub-range
//! - `config` / `config_loader`: YAML run configuration and CLI overrides
//! - `report`: console summary and JSON report
//! - `selftest`: built-in classification fixtures
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ipcrunch::range::AddressRange;
//! use ipcrunch::scheduler::{run_parallel, SchedulerOptions};
//!
//! let range = AddressRange::new(0, 0xffff).unwrap();
//! let summary = run_parallel(range, &SchedulerOptions::default())?;
//! println!("{}", ipcrunch::report::format_run_summary(&summary));
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Leaf operations return typed errors (`DigitError`, `ClassifyError`,
//! `ValidationError`); batch, scheduling and I/O functions return
//! `color_eyre::Result` with context attached.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod config_loader;
pub mod digits;
pub mod partition;
pub mod range;
pub mod report;
pub mod scheduler;
pub mod selftest;

pub use classifier::{classify, Classification, ClassifyError};
pub use digits::{DigitBuffer, DigitError};
pub use range::AddressRange;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::range::AddressRange;
use crate::scheduler::{default_worker_count, SchedulerOptions};

/// Run configuration for a parallel scan
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub range: RangeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Write every unique address to a per-worker text file
    pub log_uniques: bool,
    /// Directory for the per-worker text files
    pub log_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

/// Address bounds of the scan, both inclusive
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RangeConfig {
    pub start: u32,
    pub end: u32,
}

impl RunConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.range.start > self.range.end {
            return Err(ValidationError::InvalidRange(format!(
                "start {:#010x} is after end {:#010x}",
                self.range.start, self.range.end
            )));
        }

        if self.workers == Some(0) {
            return Err(ValidationError::InvalidWorkers(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.log_uniques && self.log_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidLogging(
                "log_dir cannot be empty when log_uniques is set".to_string(),
            ));
        }

        Ok(())
    }

    /// Address range to scan
    pub fn address_range(&self) -> Result<AddressRange, ValidationError> {
        AddressRange::new(self.range.start, self.range.end).ok_or_else(|| {
            ValidationError::InvalidRange(format!(
                "start {:#010x} is after end {:#010x}",
                self.range.start, self.range.end
            ))
        })
    }

    /// Scheduler settings derived from this configuration
    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            workers: self.workers.unwrap_or_else(default_worker_count),
            log_dir: self.log_uniques.then(|| self.log_dir.clone()),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid range configuration: {0}")]
    InvalidRange(String),
    #[error("Invalid worker configuration: {0}")]
    InvalidWorkers(String),
    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),
}

/// Default implementations
impl Default for RunConfig {
    fn default() -> Self {
        Self {
            range: RangeConfig::default(),
            workers: None,
            log_uniques: false,
            log_dir: PathBuf::from("."),
            report: None,
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start: AddressRange::FULL.start,
            end: AddressRange::FULL.end,
        }
    }
}

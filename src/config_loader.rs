use crate::config::RunConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse a run configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<RunConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: RunConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Load the configuration if a path was given, otherwise use defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<RunConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(RunConfig::default()),
    }
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub workers: Option<usize>,
    pub log_uniques: bool,
    pub log_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Apply CLI overrides to a run configuration
pub fn apply_overrides(config: &mut RunConfig, overrides: &RunOverrides) -> Result<()> {
    if let Some(start) = overrides.start {
        info!("Overriding range start: {:#010x}", start);
        config.range.start = start;
    }

    if let Some(end) = overrides.end {
        info!("Overriding range end: {:#010x}", end);
        config.range.end = end;
    }

    if let Some(workers) = overrides.workers {
        info!("Overriding worker count: {}", workers);
        config.workers = Some(workers);
    }

    // The flag can only switch logging on
    if overrides.log_uniques {
        config.log_uniques = true;
    }

    if let Some(log_dir) = &overrides.log_dir {
        config.log_dir = log_dir.clone();
    }

    if let Some(report) = &overrides.report {
        config.report = Some(report.clone());
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

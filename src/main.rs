use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use ipcrunch::batch::count_uniques;
use ipcrunch::classifier::{classify, valid_partition_count};
use ipcrunch::config_loader::{self, RunOverrides};
use ipcrunch::digits::DigitBuffer;
use ipcrunch::range::{parse_address, AddressRange};
use ipcrunch::{report, scheduler, selftest};

/// Counts 32-bit addresses whose dot-free digit string has exactly one reading
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML run configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the classifier against the built-in fixtures
    SelfTest,

    /// Classify digit strings such as 124163241225
    Classify {
        /// Digit strings without separators
        #[arg(required = true)]
        digits: Vec<String>,
    },

    /// Count uniques over a range on the current thread
    Batch {
        /// First address, decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_address, default_value = "0x0")]
        start: u32,

        /// Last address (inclusive), decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_address, default_value = "0xffff")]
        end: u32,

        /// Write every unique address to this file, one per line
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count uniques over a range with one worker per sub-range
    Run {
        /// First address, decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_address)]
        start: Option<u32>,

        /// Last address (inclusive), decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_address)]
        end: Option<u32>,

        /// Number of workers (default: available parallelism)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Write unique addresses to one uniqueNN.txt file per worker
        #[arg(long)]
        log_uniques: bool,

        /// Directory for the per-worker files
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Write a JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Commands::SelfTest => run_self_test(),
        Commands::Classify { digits } => run_classify(&digits),
        Commands::Batch { start, end, output } => run_batch(start, end, output),
        Commands::Run {
            start,
            end,
            workers,
            log_uniques,
            log_dir,
            report,
        } => {
            let overrides = RunOverrides {
                start,
                end,
                workers,
                log_uniques,
                log_dir,
                report,
            };
            run_global(cli.config, &overrides)
        }
    }
}

fn run_self_test() -> Result<()> {
    let report = selftest::run_self_tests();
    let failed = report.failures().count();
    if failed > 0 {
        return Err(eyre!(
            "{} of {} self-test fixtures failed",
            failed,
            report.outcomes.len()
        ));
    }
    info!("All {} self-test fixtures passed", report.outcomes.len());
    Ok(())
}

fn run_classify(inputs: &[String]) -> Result<()> {
    for input in inputs {
        let digits = DigitBuffer::decode(input)
            .wrap_err_with(|| format!("Invalid digit string '{}'", input))?;
        let readings = valid_partition_count(&digits);
        match classify(&digits) {
            Ok(classification) => {
                println!("{}: {} ({} valid readings)", input, classification, readings)
            }
            Err(e) => println!("{}: {}", input, e),
        }
    }
    Ok(())
}

fn run_batch(start: u32, end: u32, output: Option<PathBuf>) -> Result<()> {
    let range = AddressRange::new(start, end)
        .ok_or_else(|| eyre!("Start {:#010x} is after end {:#010x}", start, end))?;
    info!("Starting: From {:08x} to {:08x}...", range.start, range.end);

    let stopwatch = Instant::now();
    let uniques = match &output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create output file '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            let uniques = count_uniques(range, Some(&mut writer))?;
            writer
                .flush()
                .wrap_err_with(|| format!("Failed to flush output file '{}'", path.display()))?;
            uniques
        }
        None => count_uniques(range, None)?,
    };

    println!(
        "{}",
        report::format_summary(uniques, range.len(), stopwatch.elapsed())
    );
    Ok(())
}

fn run_global(config_path: Option<PathBuf>, overrides: &RunOverrides) -> Result<()> {
    let mut config = config_loader::load_or_default(config_path.as_deref())?;
    config_loader::apply_overrides(&mut config, overrides)?;

    let range = config.address_range()?;
    let options = config.scheduler_options();
    if let Some(dir) = &options.log_dir {
        info!("Logging unique addresses to {:?}", dir);
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create log directory '{}'", dir.display()))?;
    }

    let summary = scheduler::run_parallel(range, &options)?;
    debug!("Per-worker results:\n{}", report::format_worker_table(&summary));
    println!("{}", report::format_run_summary(&summary));

    if let Some(path) = &config.report {
        report::generate_json_report(&summary, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["ipcrunch", "batch", "--start", "0x10", "--end", "4096"]);
        match cli.command {
            Commands::Batch { start, end, output } => {
                assert_eq!(start, 0x10);
                assert_eq!(end, 4096);
                assert_eq!(output, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_batch_defaults() {
        let cli = Cli::parse_from(["ipcrunch", "batch"]);
        match cli.command {
            Commands::Batch { start, end, .. } => {
                assert_eq!(start, 0);
                assert_eq!(end, 0xffff);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_args() {
        let cli = Cli::parse_from([
            "ipcrunch",
            "--config",
            "run.yaml",
            "run",
            "-j",
            "8",
            "--log-uniques",
            "--log-dir",
            "uniques",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("run.yaml")));
        match cli.command {
            Commands::Run {
                start,
                workers,
                log_uniques,
                log_dir,
                ..
            } => {
                assert_eq!(start, None);
                assert_eq!(workers, Some(8));
                assert!(log_uniques);
                assert_eq!(log_dir, Some(PathBuf::from("uniques")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(Cli::try_parse_from(["ipcrunch", "batch", "--start", "0x1g"]).is_err());
        assert!(Cli::try_parse_from(["ipcrunch", "classify"]).is_err());
    }
}

//! Report generation for scan results.
//!
//! Produces the one-line console summary and a JSON report.

use std::fs;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Context, Result};

use crate::scheduler::RunSummary;

/// Summary line for a finished scan, e.g.
/// `Finished. Uniques: 10/10 (100.00%). Time: 3 ms.`
pub fn format_summary(uniques: u64, scanned: u64, elapsed: Duration) -> String {
    let percentage = if scanned == 0 {
        0.0
    } else {
        100.0 * uniques as f64 / scanned as f64
    };
    format!(
        "Finished. Uniques: {}/{} ({:.2}%). Time: {} ms.",
        uniques,
        scanned,
        percentage,
        elapsed.as_millis()
    )
}

/// Summary line for a parallel run
pub fn format_run_summary(summary: &RunSummary) -> String {
    format_summary(summary.uniques, summary.scanned, summary.elapsed)
}

/// Per-worker breakdown, one line per worker
pub fn format_worker_table(summary: &RunSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("{:<8} {:<22} {:>12} {:>10}", "Worker", "Range", "Uniques", "Time"));
    lines.push("-".repeat(55));
    for worker in &summary.per_worker {
        lines.push(format!(
            "{:<8} {:<22} {:>12} {:>7} ms",
            worker.index,
            worker.range.to_string(),
            worker.uniques,
            worker.elapsed.as_millis()
        ));
    }
    lines.join("\n")
}

/// Generate JSON report
pub fn generate_json_report(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::AddressRange;
    use crate::scheduler::WorkerReport;
    use chrono::Utc;

    fn sample_summary() -> RunSummary {
        let range = AddressRange::new(0, 99).unwrap();
        let halves = range.split(2);
        RunSummary {
            started_at: Utc::now(),
            range,
            workers: 2,
            uniques: 60,
            scanned: 100,
            elapsed: Duration::from_millis(1500),
            per_worker: halves
                .into_iter()
                .enumerate()
                .map(|(index, range)| WorkerReport {
                    index,
                    range,
                    uniques: 30,
                    elapsed: Duration::from_millis(700),
                    log_file: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(
            format_summary(1, 3, Duration::from_millis(42)),
            "Finished. Uniques: 1/3 (33.33%). Time: 42 ms."
        );
        assert_eq!(
            format_summary(0, 0, Duration::ZERO),
            "Finished. Uniques: 0/0 (0.00%). Time: 0 ms."
        );
        assert_eq!(
            format_run_summary(&sample_summary()),
            "Finished. Uniques: 60/100 (60.00%). Time: 1500 ms."
        );
    }

    #[test]
    fn test_worker_table() {
        let table = format_worker_table(&sample_summary());
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("00000000..=00000031"));
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        generate_json_report(&sample_summary(), &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["uniques"], 60);
        assert_eq!(json["scanned"], 100);
        assert_eq!(json["elapsed"], "1s 500ms");
        assert_eq!(json["range"]["end"], 99);
        assert_eq!(json["per_worker"].as_array().unwrap().len(), 2);
        assert!(json["per_worker"][0].get("log_file").is_none());
    }
}

//! # Progress Tracking and Summary Module
//!
//! Questo modulo gestisce il progress tracking e il riepilogo del batch.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Report per-file (`FileReport`) con frazione di completamento
//! - Accumulo del riepilogo finale (`RunSummary`): successi, fallimenti
//!   con motivo, output root
//!
//! ## Lifecycle del summary:
//! Creato vuoto all'avvio del batch, mutato a ogni file completato,
//! congelato e restituito dopo l'ultimo file.
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [=======================>----------------] 42/70 (60%) ✅ sub/foto.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one processed file, delivered to the progress callback.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// 1-based sequence index of the file
    pub index: usize,
    /// Total number of discovered files
    pub total: usize,
    /// Source path relative to the input root
    pub source: PathBuf,
    /// Written output path on success
    pub output: Option<PathBuf>,
    /// Failure reason on error
    pub error: Option<String>,
}

impl FileReport {
    /// Completed fraction in [0, 1]; exactly 1.0 after the last file.
    pub fn fraction(&self) -> f64 {
        self.index as f64 / self.total as f64
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// One failed file with its human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub name: String,
    pub reason: String,
}

/// Accumulated result of a full batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Total files discovered
    pub total: usize,
    /// Files written successfully
    pub succeeded: usize,
    /// Per-file failures, in run order
    pub failures: Vec<FailedFile>,
    /// Final output root
    pub output_root: PathBuf,
}

impl RunSummary {
    pub fn new(total: usize, output_root: PathBuf) -> Self {
        Self {
            total,
            succeeded: 0,
            failures: Vec::new(),
            output_root,
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, name: String, reason: String) {
        self.failures.push(FailedFile { name, reason });
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Files processed so far, successes and failures together.
    pub fn completed(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Succeeded: {} | Failed: {} | Output: {}",
            self.completed(),
            self.succeeded,
            self.failed(),
            self.output_root.display()
        )
    }
}

/// Manages the progress bar rendering for a batch run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager for `total_files` files.
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Advance the bar by one file, showing its outcome.
    pub fn update_file(&self, report: &FileReport) {
        let message = match &report.error {
            None => format!("✅ {}", report.source.display()),
            Some(reason) => format!("❌ {}: {}", report.source.display(), reason),
        };
        self.bar.inc(1);
        self.bar.set_message(message);
    }

    /// Finish with a final message.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accumulation() {
        let mut summary = RunSummary::new(3, PathBuf::from("/out"));
        summary.record_success();
        summary.record_success();
        summary.record_failure("b.png".to_string(), "failed to decode image".to_string());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.completed(), 3);
        assert_eq!(summary.failures[0].name, "b.png");
    }

    #[test]
    fn test_fraction_reaches_exactly_one() {
        let report = FileReport {
            index: 4,
            total: 4,
            source: PathBuf::from("d.jpg"),
            output: Some(PathBuf::from("/out/d.webp")),
            error: None,
        };
        assert_eq!(report.fraction(), 1.0);
        assert!(report.succeeded());
    }

    #[test]
    fn test_format_summary() {
        let mut summary = RunSummary::new(2, PathBuf::from("/out"));
        summary.record_success();
        summary.record_failure("x.jpg".to_string(), "IO error".to_string());
        let text = summary.format_summary();
        assert!(text.contains("Succeeded: 1"));
        assert!(text.contains("Failed: 1"));
    }
}

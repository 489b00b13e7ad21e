//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per consumatori
//! programmatici (wrapper Python/Electron) al posto della progress bar.
//!
//! ## Responsabilità:
//! - Emette messaggi JSON strutturati, uno per riga, su stdout
//! - Riusa i tipi esistenti di FileReport e RunSummary
//!
//! ## Tipi di messaggi:
//! - `start`: discovery conclusa, il batch sta per partire
//! - `file_complete`: fine elaborazione di un file (successo o errore)
//! - `empty`: nessuna immagine trovata sotto la input root
//! - `complete`: fine batch con riepilogo (anche per run cancellati)
//! - `error`: errore fatale di configurazione

use crate::progress::{FailedFile, FileReport, RunSummary};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio del batch
    #[serde(rename = "start")]
    Start { total_files: usize },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        index: usize,
        total: usize,
        fraction: f64,
        source: PathBuf,
        output: Option<PathBuf>,
        error: Option<String>,
    },

    /// Nessuna immagine trovata
    #[serde(rename = "empty")]
    Empty { message: String },

    /// Batch terminato
    #[serde(rename = "complete")]
    Complete {
        total: usize,
        succeeded: usize,
        failed: usize,
        failures: Vec<FailedFile>,
        output_root: PathBuf,
        cancelled: bool,
    },

    /// Errore fatale
    #[serde(rename = "error")]
    Error { message: String },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(total_files: usize) -> Self {
        Self::Start { total_files }
    }

    pub fn file_complete(report: &FileReport) -> Self {
        Self::FileComplete {
            index: report.index,
            total: report.total,
            fraction: report.fraction(),
            source: report.source.clone(),
            output: report.output.clone(),
            error: report.error.clone(),
        }
    }

    pub fn empty() -> Self {
        Self::Empty {
            message: "no images found in the input directory".to_string(),
        }
    }

    pub fn complete(summary: &RunSummary, cancelled: bool) -> Self {
        Self::Complete {
            total: summary.total,
            succeeded: summary.succeeded,
            failed: summary.failed(),
            failures: summary.failures.clone(),
            output_root: summary.output_root.clone(),
            cancelled,
        }
    }

    pub fn error(message: String) -> Self {
        Self::Error { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_complete_serialization() {
        let report = FileReport {
            index: 2,
            total: 4,
            source: PathBuf::from("sub/b.png"),
            output: None,
            error: Some("failed to decode image".to_string()),
        };
        let json = serde_json::to_string(&JsonMessage::file_complete(&report)).unwrap();
        assert!(json.contains("\"type\":\"file_complete\""));
        assert!(json.contains("\"fraction\":0.5"));
        assert!(json.contains("failed to decode image"));
    }

    #[test]
    fn test_complete_serialization() {
        let mut summary = RunSummary::new(2, PathBuf::from("/out"));
        summary.record_success();
        summary.record_failure("x.jpg".to_string(), "IO error".to_string());

        let json = serde_json::to_string(&JsonMessage::complete(&summary, false)).unwrap();
        assert!(json.contains("\"type\":\"complete\""));
        assert!(json.contains("\"succeeded\":1"));
        assert!(json.contains("\"cancelled\":false"));
    }
}

//! # Batch Orchestrator Module
//!
//! Questo è il modulo principale che orchestra tutto il processo di
//! ottimizzazione batch.
//!
//! ## Responsabilità:
//! - Coordinamento di tutti gli altri moduli
//! - Discovery dei file e verifica della configurazione prima dell'avvio
//! - Loop di processing seriale su un singolo worker in background
//! - Composizione dei nomi di output e disambiguazione delle collisioni
//! - Aggregazione di progressi ed errori nel `RunSummary`
//! - Cancellazione cooperativa tra un file e il successivo
//!
//! ## Flusso di esecuzione:
//! 1. **Validazione**: config verificata in `new` (nessun file toccato se fallisce)
//! 2. **Discovery**: trova le immagini sotto la input root; vuoto → `NoImages`
//! 3. **Output root**: creata ricorsivamente; fallimento → errore fatale
//! 4. **Worker**: il loop gira su `spawn_blocking`, un file alla volta in
//!    ordine di discovery, così il runtime async resta reattivo
//! 5. **Per file**: mirror della sottodirectory, nome composto, transform,
//!    esito registrato, evento `FileDone` emesso
//! 6. **Terminazione**: summary congelato e restituito come `Completed`
//!
//! ## Gestione errori:
//! - Gli errori sul singolo file non bloccano mai il batch: vengono
//!   registrati nel summary e si passa al file successivo
//! - Solo gli errori di configurazione fermano il run prima dell'avvio
//!
//! ## Concorrenza:
//! - Un solo worker, processing strettamente sequenziale
//! - Nessuno stato condiviso oltre al contatore di sequenza e al summary,
//!   entrambi posseduti dal worker
//! - Il chiamante osserva solo gli eventi consegnati dalla callback
//!
//! ## Esempio:
//! ```rust,ignore
//! let optimizer = BatchOptimizer::new(config)?;
//! let outcome = optimizer.run(|event| { /* render progress */ }).await?;
//! ```

use crate::config::{JobConfig, MaxSize};
use crate::error::OptimizeError;
use crate::file_manager::{DiscoveredFile, FileManager};
use crate::image_processor::ImageProcessor;
use crate::naming;
use crate::progress::{FileReport, RunSummary};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Progress notification delivered to the caller's event callback.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Discovery finished; the batch is about to start.
    Started { total: usize },
    /// One file finished (successfully or not).
    FileDone(FileReport),
}

/// Terminal state of a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    /// The input root exists but holds no matching images.
    NoImages,
    /// Every discovered file was processed.
    Completed(RunSummary),
    /// A stop signal ended the run between files; the summary is partial.
    Cancelled(RunSummary),
}

/// Main batch orchestrator
pub struct BatchOptimizer {
    config: JobConfig,
    stop_receiver: Option<broadcast::Receiver<()>>,
}

impl BatchOptimizer {
    /// Create a new batch optimizer, validating the configuration.
    pub fn new(config: JobConfig) -> Result<Self, OptimizeError> {
        config.validate()?;
        Ok(Self {
            config,
            stop_receiver: None,
        })
    }

    /// Create a batch optimizer that stops between files once a signal
    /// arrives on `stop_receiver`.
    pub fn with_cancellation(
        config: JobConfig,
        stop_receiver: broadcast::Receiver<()>,
    ) -> Result<Self, OptimizeError> {
        config.validate()?;
        Ok(Self {
            config,
            stop_receiver: Some(stop_receiver),
        })
    }

    /// Run the batch on a single background worker.
    ///
    /// `on_event` fires once with `Started` after discovery and once per file
    /// with `FileDone`; the awaited return value is the completion contract.
    /// Only configuration-level failures surface as `Err` - per-file errors
    /// land in the summary.
    pub async fn run<F>(self, on_event: F) -> Result<BatchOutcome, OptimizeError>
    where
        F: FnMut(&BatchEvent) + Send + 'static,
    {
        info!(
            "Starting image optimization in: {}",
            self.config.input_root.display()
        );
        info!(
            "🎯 Format: {} (quality: {})",
            self.config.target_format.extension(),
            self.config.quality
        );
        match self.config.max_size {
            MaxSize::Bounded(w, h) => info!("📏 Max size: {}x{}", w, h),
            MaxSize::Original => info!("📏 Max size: original dimensions"),
        }
        if self.config.numbering_enabled {
            info!("🔢 Sequential numbering enabled");
        }
        info!("📁 Output directory: {}", self.config.output_root.display());

        let files = FileManager::find_images(&self.config.input_root);
        if files.is_empty() {
            info!("No images found to process");
            return Ok(BatchOutcome::NoImages);
        }
        info!("Found {} images to process", files.len());

        std::fs::create_dir_all(&self.config.output_root).map_err(|source| {
            OptimizeError::OutputDir {
                path: self.config.output_root.clone(),
                source,
            }
        })?;

        // Decoding and encoding are CPU-bound: keep the whole serial loop on
        // one blocking worker so the caller's runtime stays responsive.
        tokio::task::spawn_blocking(move || self.process_all(files, on_event))
            .await
            .map_err(|e| OptimizeError::Worker(e.to_string()))
    }

    fn process_all<F>(mut self, files: Vec<DiscoveredFile>, mut on_event: F) -> BatchOutcome
    where
        F: FnMut(&BatchEvent),
    {
        let total = files.len();
        on_event(&BatchEvent::Started { total });

        let processor = ImageProcessor::new(
            self.config.target_format,
            self.config.quality,
            self.config.max_size,
        );
        let mut summary = RunSummary::new(total, self.config.output_root.clone());
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for file in files {
            if self.should_stop() {
                warn!(
                    "Stop signal received, ending batch after {} of {} files",
                    summary.completed(),
                    total
                );
                return BatchOutcome::Cancelled(summary);
            }

            let output_path = self.output_path_for(&file, &mut planned);

            let report = match processor.transform(&file.path, &output_path) {
                Ok(()) => {
                    debug!(
                        "{} -> {}",
                        file.relative.display(),
                        output_path.display()
                    );
                    summary.record_success();
                    FileReport {
                        index: file.index,
                        total,
                        source: file.relative.clone(),
                        output: Some(output_path),
                        error: None,
                    }
                }
                Err(err) => {
                    error!("Failed to process {}: {}", file.relative.display(), err);
                    summary.record_failure(
                        file.relative.display().to_string(),
                        err.to_string(),
                    );
                    FileReport {
                        index: file.index,
                        total,
                        source: file.relative.clone(),
                        output: None,
                        error: Some(err.to_string()),
                    }
                }
            };

            on_event(&BatchEvent::FileDone(report));
        }

        info!("{}", summary.format_summary());
        BatchOutcome::Completed(summary)
    }

    /// Compose the output path for one file: mirrored subdirectory + composed
    /// name, disambiguated against every path already planned this run.
    fn output_path_for(&self, file: &DiscoveredFile, planned: &mut HashSet<PathBuf>) -> PathBuf {
        let stem = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = self.config.base_name(&stem);
        let index = self.config.numbering_enabled.then_some(file.index);
        let name = naming::compose_name(
            base,
            self.config.company_tag.as_deref(),
            index,
            self.config.target_format,
        );

        let target_dir = match file.relative.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(rel) => self.config.output_root.join(rel),
            None => self.config.output_root.clone(),
        };

        let mut candidate = target_dir.join(&name);
        if !planned.insert(candidate.clone()) {
            // Same composed name twice in one run: insert a counter before
            // the extension instead of silently overwriting the earlier file.
            let ext = self.config.target_format.extension();
            let suffix = format!(".{}", ext);
            let name_stem = name.strip_suffix(&suffix).unwrap_or(&name).to_string();
            let mut n = 2;
            loop {
                candidate = target_dir.join(format!("{}-{}.{}", name_stem, n, ext));
                if planned.insert(candidate.clone()) {
                    break;
                }
                n += 1;
            }
            debug!("Output name collision, renamed to {}", candidate.display());
        }

        candidate
    }

    fn should_stop(&mut self) -> bool {
        if let Some(ref mut receiver) = self.stop_receiver {
            match receiver.try_recv() {
                Ok(_) => return true,
                Err(broadcast::error::TryRecvError::Empty) => return false,
                // Signal was sent but we missed it, treat as stop
                Err(broadcast::error::TryRecvError::Lagged(_)) => return true,
                // Sender was dropped, continue processing
                Err(broadcast::error::TryRecvError::Closed) => return false,
            }
        }
        false
    }
}

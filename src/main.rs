//! # SEO Image Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Risoluzione della output root di default (`<input>-otimizada`)
//! - Wiring degli eventi del batch verso progress bar o JSON lines
//! - Gestione di ctrl-c come segnale di stop cooperativo
//!
//! ## Exit code:
//! Diverso da zero solo per errori di configurazione (input root mancante,
//! parametri invalidi). Gli errori sui singoli file terminano comunque con
//! exit zero: il run è "completed with warnings" e i motivi sono nel summary.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! seo-image-optimizer ./foto --prefix "produto xyz" --company "Acme Co" \
//!     --numbered --format webp --quality 80 --max-size full-hd
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::{info, warn};

use seo_image_optimizer::{
    BatchEvent, BatchOptimizer, BatchOutcome, JobConfig, JsonMessage, OutputFormat,
    ProgressManager, SizePreset,
};

#[derive(Parser)]
#[command(name = "seo-image-optimizer")]
#[command(about = "Batch-optimize a folder of images with SEO-friendly names")]
struct Args {
    /// Directory containing the images to optimize
    input_dir: PathBuf,

    /// Output directory (default: "<input_dir>-otimizada")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base name for output files (default: each file's original name)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Company tag appended to every output name
    #[arg(short, long)]
    company: Option<String>,

    /// Append a sequence number to every output name
    #[arg(short, long)]
    numbered: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "webp")]
    format: OutputFormat,

    /// Encoder quality (1-100); ignored for PNG output
    #[arg(short, long, default_value = "80")]
    quality: u8,

    /// Maximum output size preset
    #[arg(short, long, value_enum, default_value = "full-hd")]
    max_size: SizePreset,

    /// Emit progress and results as JSON lines instead of a progress bar
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| JobConfig::default_output_root(&args.input_dir));

    let config = JobConfig {
        input_root: args.input_dir.clone(),
        output_root,
        name_prefix: args.prefix.clone(),
        company_tag: args.company.clone(),
        numbering_enabled: args.numbered,
        target_format: args.format,
        quality: args.quality,
        max_size: args.max_size.max_size(),
    };

    let (stop_sender, stop_receiver) = broadcast::channel(1);
    let optimizer = match BatchOptimizer::with_cancellation(config, stop_receiver) {
        Ok(optimizer) => optimizer,
        Err(err) => {
            if args.json {
                JsonMessage::error(err.to_string()).emit();
            }
            return Err(err.into());
        }
    };

    // Ctrl-c asks the batch to stop between files
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_sender.send(());
        }
    });

    let json = args.json;
    let progress: Arc<Mutex<Option<ProgressManager>>> = Arc::new(Mutex::new(None));
    let progress_events = Arc::clone(&progress);

    let outcome = optimizer
        .run(move |event| match event {
            BatchEvent::Started { total } => {
                if json {
                    JsonMessage::start(*total).emit();
                } else {
                    *progress_events.lock().unwrap() =
                        Some(ProgressManager::new(*total as u64));
                }
            }
            BatchEvent::FileDone(report) => {
                if json {
                    JsonMessage::file_complete(report).emit();
                } else if let Some(bar) = progress_events.lock().unwrap().as_ref() {
                    bar.update_file(report);
                }
            }
        })
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            if json {
                JsonMessage::error(err.to_string()).emit();
            }
            return Err(err.into());
        }
    };

    match outcome {
        BatchOutcome::NoImages => {
            if json {
                JsonMessage::empty().emit();
            } else {
                warn!("⚠️ No images found in {}", args.input_dir.display());
            }
        }
        BatchOutcome::Completed(summary) => {
            if let Some(bar) = progress.lock().unwrap().as_ref() {
                bar.finish(&summary.format_summary());
            }
            if json {
                JsonMessage::complete(&summary, false).emit();
            } else {
                info!(
                    "🚀 Optimization complete! {} of {} files saved in: {}",
                    summary.succeeded,
                    summary.total,
                    summary.output_root.display()
                );
                if !summary.failures.is_empty() {
                    warn!("⚠️ {} file(s) failed:", summary.failed());
                    for failure in &summary.failures {
                        warn!("  ❌ {}: {}", failure.name, failure.reason);
                    }
                }
            }
        }
        BatchOutcome::Cancelled(summary) => {
            if let Some(bar) = progress.lock().unwrap().as_ref() {
                bar.finish("cancelled");
            }
            if json {
                JsonMessage::complete(&summary, true).emit();
            } else {
                warn!(
                    "🛑 Run cancelled after {} of {} files",
                    summary.completed(),
                    summary.total
                );
            }
        }
    }

    Ok(())
}

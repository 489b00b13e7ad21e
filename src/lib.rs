//! # SEO Image Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom (fatali e per-file)
//! - `naming`: Sanitizzazione e composizione dei nomi SEO-friendly
//! - `file_manager`: Discovery ricorsiva delle immagini
//! - `image_processor`: Trasformazione singola immagine (resize + re-encode)
//! - `optimizer`: Orchestratore del batch seriale
//! - `progress`: Progress tracking e riepilogo del run
//! - `json_output`: Output strutturato per consumatori programmatici
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use seo_image_optimizer::{BatchOptimizer, JobConfig};
//!
//! let optimizer = BatchOptimizer::new(config)?;
//! let outcome = optimizer.run(|event| { /* progress */ }).await?;
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod file_manager;
pub mod image_processor;
pub mod optimizer;
pub mod progress;
pub mod json_output;

pub use config::{JobConfig, MaxSize, OutputFormat, SizePreset};
pub use error::{OptimizeError, TransformError};
pub use json_output::JsonMessage;
pub use optimizer::{BatchEvent, BatchOptimizer, BatchOutcome};
pub use progress::{FailedFile, FileReport, ProgressManager, RunSummary};

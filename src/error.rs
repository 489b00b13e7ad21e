//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` per gli errori fatali di configurazione/run
//! - Definisce `TransformError` per gli errori recuperabili sul singolo file
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Taxonomy:
//! - `OptimizeError`: ferma il run prima che qualsiasi file venga toccato
//!   (input directory mancante, output root non creabile, parametri invalidi)
//! - `TransformError`: scoped al singolo file (decode, encode, I/O); viene
//!   registrato nel summary e il batch continua con il file successivo
//!
//! ## Esempio:
//! ```rust,ignore
//! if !config.input_root.is_dir() {
//!     return Err(OptimizeError::InputDirMissing(config.input_root.clone()));
//! }
//! ```

use std::path::PathBuf;

/// Fatal errors: nothing has been processed when one of these is returned.
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("worker task failed: {0}")]
    Worker(String),
}

/// Per-file errors: recorded in the run summary, never abort the batch.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

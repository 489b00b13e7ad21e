//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione di un run di ottimizzazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `JobConfig` con tutti i parametri del batch
//! - Fornisce validazione robusta dei parametri di input
//! - Deriva la output root di default (`<input>-otimizada`)
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//!
//! ## Parametri di configurazione:
//! - `input_root`: directory sorgente (deve esistere)
//! - `output_root`: directory destinazione (creata se assente)
//! - `name_prefix`: nome base opzionale; fallback allo stem di ogni file
//! - `company_tag`: token opzionale appeso a ogni nome di output
//! - `numbering_enabled`: appende l'indice di sequenza 1-based per file
//! - `target_format`: formato di output (webp/jpg/jpeg/png)
//! - `quality`: qualità encoder (1-100), ignorata dai formati lossless
//! - `max_size`: bound proporzionale shrink-only, oppure `Original`
//!
//! ## Validazione:
//! - Controlla che quality sia 1-100
//! - Controlla che il bound abbia dimensioni non nulle
//! - Controlla che input_root esista e sia una directory
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = JobConfig {
//!     quality: 80,
//!     max_size: SizePreset::FullHd.max_size(),
//!     ..base_config
//! };
//! config.validate()?;
//! ```

use crate::error::OptimizeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Target encoding for every output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpg,
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension used for composed output names.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }
}

/// Upper bound applied to output dimensions.
///
/// `Bounded` is a proportional shrink-only fit: images already within the
/// bound keep their exact dimensions, larger images are scaled down
/// preserving aspect ratio so neither dimension exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxSize {
    /// Keep original dimensions.
    Original,
    /// Fit within (max_width, max_height).
    Bounded(u32, u32),
}

/// Named size presets exposed by the user-facing shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SizePreset {
    /// Full HD (1920x1080)
    FullHd,
    /// HD (1600x900)
    Hd,
    /// Web standard (1200x800)
    WebStandard,
    /// Instagram post (1080x1080)
    InstagramPost,
    /// Stories/Reels (1080x1920)
    Stories,
    /// Miniature (800x800)
    Miniature,
    /// Thumbnail (600x400)
    Thumbnail,
    /// Small profile (400x400)
    SmallProfile,
    /// Keep original dimensions
    Original,
}

impl SizePreset {
    /// Map the preset to the bound enforced by the transform.
    pub fn max_size(&self) -> MaxSize {
        match self {
            SizePreset::FullHd => MaxSize::Bounded(1920, 1080),
            SizePreset::Hd => MaxSize::Bounded(1600, 900),
            SizePreset::WebStandard => MaxSize::Bounded(1200, 800),
            SizePreset::InstagramPost => MaxSize::Bounded(1080, 1080),
            SizePreset::Stories => MaxSize::Bounded(1080, 1920),
            SizePreset::Miniature => MaxSize::Bounded(800, 800),
            SizePreset::Thumbnail => MaxSize::Bounded(600, 400),
            SizePreset::SmallProfile => MaxSize::Bounded(400, 400),
            SizePreset::Original => MaxSize::Original,
        }
    }
}

/// Configuration for one batch run, fully resolved before any file is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Source directory (must exist)
    pub input_root: PathBuf,
    /// Destination directory (created if absent)
    pub output_root: PathBuf,
    /// Base name override; None/empty falls back to each file's stem
    pub name_prefix: Option<String>,
    /// Suffix token appended to every output name
    pub company_tag: Option<String>,
    /// Append the 1-based sequence index to every output name
    pub numbering_enabled: bool,
    /// Output encoding
    pub target_format: OutputFormat,
    /// Encoder quality (1-100); ignored by lossless targets
    pub quality: u8,
    /// Dimension bound (shrink-only fit)
    pub max_size: MaxSize,
}

impl JobConfig {
    /// Default output root when the caller leaves it empty: the input root
    /// with `-otimizada` appended to its path string.
    pub fn default_output_root(input_root: &Path) -> PathBuf {
        let mut path = input_root.as_os_str().to_os_string();
        path.push("-otimizada");
        PathBuf::from(path)
    }

    /// Base name for a file: the configured prefix when non-empty, otherwise
    /// the file's original stem.
    pub fn base_name<'a>(&'a self, stem: &'a str) -> &'a str {
        match self.name_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => stem,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(OptimizeError::Validation(
                "quality must be between 1 and 100".to_string(),
            ));
        }

        if let MaxSize::Bounded(w, h) = self.max_size {
            if w == 0 || h == 0 {
                return Err(OptimizeError::Validation(
                    "size bound dimensions must be greater than 0".to_string(),
                ));
            }
        }

        if !self.input_root.is_dir() {
            return Err(OptimizeError::InputDirMissing(self.input_root.clone()));
        }

        Ok(())
    }

    /// Load configuration from a JSON file.
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: JobConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub async fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

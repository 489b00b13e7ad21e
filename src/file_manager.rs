//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file immagine da processare.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva delle immagini sotto la input root
//! - Filtro per estensione (jpg/jpeg/png/webp, case-insensitive)
//! - Assegnazione dell'indice di sequenza 1-based in ordine di walk
//! - Calcolo del path relativo usato per il mirroring delle sottodirectory
//!
//! ## Ordine di discovery:
//! Il walk è ordinato per nome file (`sort_by_file_name`), quindi l'indice di
//! sequenza consumato dall'opzione di numerazione è stabile run dopo run.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::find_images(&input_root);
//! for file in &files {
//!     println!("{} -> {}", file.index, file.relative.display());
//! }
//! ```

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One input file found under the input root.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the source file
    pub path: PathBuf,
    /// Path relative to the input root, used to mirror subdirectories
    pub relative: PathBuf,
    /// 1-based sequence index in walk order, stable within one run
    pub index: usize,
}

/// Manages file discovery
pub struct FileManager;

impl FileManager {
    /// Find every supported image under `input_root`, in deterministic walk
    /// order, with 1-based sequence indices assigned in that order.
    pub fn find_images(input_root: &Path) -> Vec<DiscoveredFile> {
        WalkDir::new(input_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| Self::is_supported_image(e.path()))
            .enumerate()
            .map(|(i, entry)| {
                let path = entry.path().to_path_buf();
                let relative = path
                    .strip_prefix(input_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone());
                DiscoveredFile {
                    path,
                    relative,
                    index: i + 1,
                }
            })
            .collect()
    }

    /// Check if a file has a supported image extension.
    pub fn is_supported_image(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "jpg" | "jpeg" | "png" | "webp")
        } else {
            false
        }
    }
}

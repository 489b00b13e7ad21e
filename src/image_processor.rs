//! # Image Processing Module
//!
//! Questo modulo gestisce la trasformazione di una singola immagine:
//! decode, normalizzazione colore, resize shrink-only e re-encode.
//!
//! ## Responsabilità:
//! - Decode del file sorgente in bitmap (`image` crate)
//! - Normalizzazione a RGB 3-canali prima dell'encode (alpha scartato)
//! - Fit proporzionale shrink-only dentro il bound configurato
//! - Encode al formato/qualità target e scrittura su disco
//! - Creazione ricorsiva della directory parent dell'output
//!
//! ## Pipeline per file:
//! 1. **Decode**: `image::open`, errore strutturato se il file è corrotto
//! 2. **Resize**: solo se una dimensione eccede il bound; mai upscaling
//! 3. **Normalize**: conversione a RGB8, la trasparenza viene scartata
//! 4. **Encode**: JPEG/PNG via gli encoder di `image`, WebP lossy via `webp`
//! 5. **Write**: directory parent create on demand, poi scrittura atomica
//!    del buffer encodato
//!
//! ## Qualità:
//! - JPEG e WebP usano il parametro quality (1-100)
//! - PNG è lossless: il parametro è accettato e ignorato
//!
//! ## Error handling:
//! Ogni fallimento (decode, encode, I/O) torna come `TransformError`:
//! il chiamante riceve sempre un risultato definito, mai un panic, perché
//! l'errore su un file non deve abortire il batch.

use crate::config::{MaxSize, OutputFormat};
use crate::error::TransformError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, ImageEncoder, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Transforms one source image into one output file under a fixed policy.
pub struct ImageProcessor {
    target_format: OutputFormat,
    quality: u8,
    max_size: MaxSize,
}

impl ImageProcessor {
    /// Create a processor for the given format/quality/size policy.
    pub fn new(target_format: OutputFormat, quality: u8, max_size: MaxSize) -> Self {
        Self {
            target_format,
            quality,
            max_size,
        }
    }

    /// Decode `input`, apply the size policy, re-encode and write `output`.
    ///
    /// Blocking, CPU-bound: callers run this on a worker thread. Every
    /// failure comes back as a `TransformError` value.
    pub fn transform(&self, input: &Path, output: &Path) -> Result<(), TransformError> {
        let img = image::open(input).map_err(TransformError::Decode)?;

        // Shrink-only fit: the resize is guarded by the bound check, so an
        // image already within the bound keeps its exact dimensions.
        let img = match self.max_size {
            MaxSize::Bounded(max_w, max_h) if img.width() > max_w || img.height() > max_h => {
                let resized = img.resize(max_w, max_h, FilterType::Lanczos3);
                debug!(
                    "Resized {} from {}x{} to {}x{}",
                    input.display(),
                    img.width(),
                    img.height(),
                    resized.width(),
                    resized.height()
                );
                resized
            }
            _ => img,
        };

        // Alpha is discarded: lossy targets need a 3-channel color model
        let rgb = img.to_rgb8();
        let bytes = self.encode(&rgb)?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, bytes)?;

        debug!("Wrote {}", output.display());
        Ok(())
    }

    fn encode(&self, rgb: &RgbImage) -> Result<Vec<u8>, TransformError> {
        let (width, height) = rgb.dimensions();

        match self.target_format {
            OutputFormat::Jpg | OutputFormat::Jpeg => {
                let mut buffer = Cursor::new(Vec::new());
                let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
                encoder
                    .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
                    .map_err(TransformError::Encode)?;
                Ok(buffer.into_inner())
            }
            OutputFormat::Png => {
                // Lossless: quality has no meaning here
                let mut buffer = Cursor::new(Vec::new());
                PngEncoder::new(&mut buffer)
                    .write_image(rgb.as_raw(), width, height, ColorType::Rgb8)
                    .map_err(TransformError::Encode)?;
                Ok(buffer.into_inner())
            }
            OutputFormat::Webp => {
                let memory =
                    webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode(f32::from(self.quality));
                Ok(memory.to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbImage::from_pixel(width, height, Rgb([120, 80, 40]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_transform_produces_each_format() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "in.png", 64, 48);

        for format in [
            OutputFormat::Webp,
            OutputFormat::Jpg,
            OutputFormat::Jpeg,
            OutputFormat::Png,
        ] {
            let processor = ImageProcessor::new(format, 80, MaxSize::Original);
            let output = temp_dir.path().join(format!("out.{}", format.extension()));
            processor.transform(&input, &output).unwrap();

            let reopened = image::open(&output).unwrap();
            assert_eq!(reopened.width(), 64);
            assert_eq!(reopened.height(), 48);
        }
    }

    #[test]
    fn test_transform_accepts_every_quality_level() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "in.png", 32, 32);

        for quality in [100, 90, 80, 60, 40] {
            let processor = ImageProcessor::new(OutputFormat::Jpg, quality, MaxSize::Original);
            let output = temp_dir.path().join(format!("q{}.jpg", quality));
            processor.transform(&input, &output).unwrap();
            assert!(image::open(&output).is_ok());
        }
    }

    #[test]
    fn test_shrink_only_keeps_small_images_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "small.png", 100, 50);

        let processor = ImageProcessor::new(OutputFormat::Png, 80, MaxSize::Bounded(200, 200));
        let output = temp_dir.path().join("small-out.png");
        processor.transform(&input, &output).unwrap();

        let reopened = image::open(&output).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (100, 50));
    }

    #[test]
    fn test_resize_preserves_aspect_ratio_within_bound() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "wide.png", 400, 200);

        let processor = ImageProcessor::new(OutputFormat::Png, 80, MaxSize::Bounded(192, 108));
        let output = temp_dir.path().join("wide-out.png");
        processor.transform(&input, &output).unwrap();

        let reopened = image::open(&output).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (192, 96));
    }

    #[test]
    fn test_resize_bounds_height_too() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "tall.png", 100, 300);

        let processor = ImageProcessor::new(OutputFormat::Png, 80, MaxSize::Bounded(200, 150));
        let output = temp_dir.path().join("tall-out.png");
        processor.transform(&input, &output).unwrap();

        let reopened = image::open(&output).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (50, 150));
    }

    #[test]
    fn test_alpha_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("alpha.png");
        let img = RgbaImage::from_pixel(16, 16, Rgba([200, 100, 50, 128]));
        img.save(&input).unwrap();

        let processor = ImageProcessor::new(OutputFormat::Png, 80, MaxSize::Original);
        let output = temp_dir.path().join("alpha-out.png");
        processor.transform(&input, &output).unwrap();

        let reopened = image::open(&output).unwrap();
        assert_eq!(reopened.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_corrupt_input_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.png");
        fs::write(&input, b"definitely not a png").unwrap();

        let processor = ImageProcessor::new(OutputFormat::Webp, 80, MaxSize::Original);
        let output = temp_dir.path().join("broken-out.webp");
        let err = processor.transform(&input, &output).unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_parent_directories_are_created() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "in.png", 8, 8);

        let processor = ImageProcessor::new(OutputFormat::Jpg, 80, MaxSize::Original);
        let output = temp_dir.path().join("a/b/c/out.jpg");
        processor.transform(&input, &output).unwrap();
        assert!(output.exists());
    }
}

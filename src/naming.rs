//! # SEO Naming Module
//!
//! Questo modulo gestisce la normalizzazione dei nomi file per output SEO-friendly.
//!
//! ## Responsabilità:
//! - Sanitizzazione dei frammenti di nome forniti dall'utente
//! - Composizione del nome finale: base + company + numerazione + estensione
//!
//! ## Regole di sanitizzazione:
//! - Ogni spazio e ogni underscore diventa un trattino
//! - Nessun troncamento: la lunghezza interagisce male con i suffissi appesi
//!
//! ## Esempio:
//! ```rust
//! use seo_image_optimizer::{naming::compose_name, OutputFormat};
//!
//! let name = compose_name("produto xyz", Some("Acme Co"), Some(3), OutputFormat::Webp);
//! assert_eq!(name, "produto-xyz-Acme-Co-3.webp");
//! ```

use crate::config::OutputFormat;

/// Normalize a user-supplied name fragment into a filesystem/SEO-safe token.
///
/// Replaces every space and underscore with a hyphen. Pure, total and
/// idempotent; the empty string maps to itself.
pub fn sanitize(name: &str) -> String {
    name.replace([' ', '_'], "-")
}

/// Compose an output file name from its sanitized parts.
///
/// `base` is the name prefix or the original file stem, `company` an optional
/// suffix token, `index` the 1-based sequence number when numbering is
/// enabled. Both text fragments are sanitized here so callers can pass raw
/// user input.
pub fn compose_name(
    base: &str,
    company: Option<&str>,
    index: Option<usize>,
    format: OutputFormat,
) -> String {
    let mut name = sanitize(base);

    if let Some(company) = company.filter(|c| !c.is_empty()) {
        name.push('-');
        name.push_str(&sanitize(company));
    }

    if let Some(index) = index {
        name.push_str(&format!("-{}", index));
    }

    name.push('.');
    name.push_str(format.extension());
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_spaces_and_underscores() {
        assert_eq!(sanitize("produto xyz"), "produto-xyz");
        assert_eq!(sanitize("foto_di_prova"), "foto-di-prova");
        assert_eq!(sanitize("mix of_both"), "mix-of-both");
    }

    #[test]
    fn test_sanitize_is_total() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "---");
        assert_eq!(sanitize("già-pulito"), "già-pulito");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["produto xyz", "a_b c", "", "no-change", "__  __"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_sanitize_does_not_truncate() {
        let long = "a ".repeat(60);
        assert_eq!(sanitize(&long).len(), long.len());
    }

    #[test]
    fn test_compose_full_name() {
        let name = compose_name("produto xyz", Some("Acme Co"), Some(3), OutputFormat::Webp);
        assert_eq!(name, "produto-xyz-Acme-Co-3.webp");
    }

    #[test]
    fn test_compose_without_company() {
        let name = compose_name("banner", None, Some(12), OutputFormat::Jpg);
        assert_eq!(name, "banner-12.jpg");
    }

    #[test]
    fn test_compose_empty_company_is_omitted() {
        let name = compose_name("banner", Some(""), None, OutputFormat::Png);
        assert_eq!(name, "banner.png");
    }

    #[test]
    fn test_compose_without_numbering() {
        let name = compose_name("hero image", Some("Acme"), None, OutputFormat::Jpeg);
        assert_eq!(name, "hero-image-Acme.jpeg");
    }
}

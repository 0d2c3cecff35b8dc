//! Best-effort plain text from document packages
//!
//! Nothing in this module returns an error or panics on bad input: previews
//! and search care more about availability than completeness. Extraction
//! runs as a ladder:
//! 1. structural walk of the primary part ([`Extraction::Structured`])
//! 2. pattern scan of the raw markup ([`Extraction::Fallback`])
//! 3. give up ([`Extraction::Unavailable`])
//!
//! # Example
//! ```
//! use petition_engine::extract::{extract, extract_text, Extraction};
//!
//! // Not a package at all: no text, no error
//! assert_eq!(extract_text(&[0xde, 0xad, 0xbe, 0xef]), "");
//! assert_eq!(extract(&[0xde, 0xad, 0xbe, 0xef]), Extraction::Unavailable);
//! ```

pub mod fallback;
pub mod sanitize;
pub mod structured;

pub use fallback::scan_markup;
pub use sanitize::sanitize;
pub use structured::{normalize_extracted, walk_part};

use std::io::{Cursor, Read};

use serde::{Deserialize, Serialize};
use tracing::debug;
use zip::ZipArchive;

use crate::config::PreviewConfig;
use crate::errors::PackageError;
use crate::format::open_package;

/// Outcome of the extraction ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", content = "text", rename_all = "snake_case")]
pub enum Extraction {
    /// Text from a clean structural walk
    Structured(String),
    /// Text recovered by pattern scanning; formatting and order are approximate
    Fallback(String),
    /// Nothing usable could be recovered
    Unavailable,
}

impl Extraction {
    /// The recovered text, or an empty string
    pub fn into_text(self) -> String {
        match self {
            Extraction::Structured(text) | Extraction::Fallback(text) => text,
            Extraction::Unavailable => String::new(),
        }
    }
}

/// Whether text is really serialized structure (`{...}` or `[...]`)
/// rather than prose
pub fn looks_like_markup(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Plain text of a package's primary part; empty on any failure
pub fn extract_text(bytes: &[u8]) -> String {
    match structured_text(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Structural extraction failed: {}", e);
            String::new()
        }
    }
}

fn structured_text(bytes: &[u8]) -> Result<String, PackageError> {
    let mut package = open_package(bytes)?;
    let xml = package.read_primary()?;
    let text = walk_part(&xml, package.format)?;
    Ok(normalize_extracted(&text))
}

/// Run the full extraction ladder
pub fn extract(bytes: &[u8]) -> Extraction {
    match open_package(bytes) {
        Ok(mut package) => {
            let xml = match package.read_primary() {
                Ok(xml) => xml,
                Err(e) => {
                    debug!("Primary part unreadable: {}", e);
                    return Extraction::Unavailable;
                }
            };

            match walk_part(&xml, package.format) {
                Ok(text) => {
                    let text = normalize_extracted(&text);
                    if !text.is_empty() {
                        return Extraction::Structured(text);
                    }
                    debug!("Structural walk found no text; scanning markup");
                }
                Err(e) => debug!("Structural walk failed, scanning markup: {}", e),
            }
            scan_fallback(&xml)
        }
        Err(PackageError::UnknownFormat) => scan_unknown_container(bytes),
        Err(e) => {
            // A broken zip is binary; only bare markup or JSON is worth scanning
            if bytes.starts_with(b"PK") {
                debug!("Package container unreadable: {}", e);
                return Extraction::Unavailable;
            }
            match std::str::from_utf8(bytes) {
                Ok(raw) => scan_fallback(raw),
                Err(_) => Extraction::Unavailable,
            }
        }
    }
}

fn scan_fallback(raw: &str) -> Extraction {
    let text = normalize_extracted(&scan_markup(raw));

    if text.is_empty() {
        return Extraction::Unavailable;
    }
    if looks_like_markup(&text) {
        debug!("Pattern scan produced serialized structure; discarding");
        return Extraction::Unavailable;
    }
    Extraction::Fallback(text)
}

/// A readable zip with no known layout: scan every markup-ish entry
fn scan_unknown_container(bytes: &[u8]) -> Extraction {
    let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) else {
        return Extraction::Unavailable;
    };

    let mut raw = String::new();
    for i in 0..archive.len() {
        let Ok(mut file) = archive.by_index(i) else {
            continue;
        };
        let name = file.name().to_lowercase();
        if !(name.ends_with(".xml") || name.ends_with(".json")) {
            continue;
        }
        let mut content = String::new();
        if file.read_to_string(&mut content).is_ok() {
            raw.push_str(&content);
            raw.push('\n');
        }
    }

    scan_fallback(&raw)
}

/// Preview text for a package, or the configured sentinel
pub fn preview(bytes: &[u8], config: &PreviewConfig) -> String {
    match extract(bytes) {
        Extraction::Structured(text) | Extraction::Fallback(text) => preview_text(&text, config),
        Extraction::Unavailable => config.unavailable_text.clone(),
    }
}

/// Sanitize and truncate text for display
pub fn preview_text(text: &str, config: &PreviewConfig) -> String {
    let clean = sanitize(text);
    let clean = clean.trim();

    if clean.is_empty() || looks_like_markup(clean) {
        return config.unavailable_text.clone();
    }

    if clean.chars().count() <= config.max_chars {
        return clean.to_string();
    }

    let mut truncated: String = clean.chars().take(config.max_chars).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

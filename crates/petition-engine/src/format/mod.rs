//! Word-processor package formats
//!
//! The merge engine and the extractor never hard-code a vendor layout:
//! everything they need to know about a package (which parts carry text,
//! which elements are paragraphs, runs, breaks and tabs) comes from a
//! [`PackageFormat`] adapter.

pub mod builder;
pub mod docx;
pub mod markup;
pub mod odt;
pub mod package;
pub mod scan;

pub use builder::build_minimal_docx;
pub use docx::WordprocessingMl;
pub use odt::OpenDocumentText;
pub use package::{open_package, read_part, OpenedPackage};

use serde::{Deserialize, Serialize};

/// Kind of document produced or consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    #[default]
    Docx,
    Odt,
    /// Last-resort plain text output
    Txt,
}

impl PackageKind {
    /// Get the MIME type for this kind
    pub fn mime_type(&self) -> &'static str {
        match self {
            PackageKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            PackageKind::Odt => "application/vnd.oasis.opendocument.text",
            PackageKind::Txt => "text/plain; charset=utf-8",
        }
    }

    /// Get the file extension for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            PackageKind::Docx => "docx",
            PackageKind::Odt => "odt",
            PackageKind::Txt => "txt",
        }
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for PackageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "docx" => Ok(PackageKind::Docx),
            "odt" => Ok(PackageKind::Odt),
            "txt" => Ok(PackageKind::Txt),
            other => Err(format!("Unknown document kind: {}", other)),
        }
    }
}

/// Layout of one package format
pub trait PackageFormat: Send + Sync {
    fn kind(&self) -> PackageKind;

    /// Whether a container with these entries is of this format
    fn detect(&self, entry_names: &[&str]) -> bool;

    /// The part holding the document body
    fn primary_part(&self) -> &'static str;

    /// Parts whose text runs take part in placeholder substitution
    fn is_text_part(&self, name: &str) -> bool;

    /// Elements delimiting a paragraph
    fn paragraph_tags(&self) -> &'static [&'static str];

    /// When `Some`, character data only counts inside this element
    fn text_tag(&self) -> Option<&'static str>;

    fn line_break_tags(&self) -> &'static [&'static str];

    fn tab_tags(&self) -> &'static [&'static str];

    /// Elements standing for a run of spaces
    fn space_tags(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_paragraph(&self, tag: &str) -> bool {
        self.paragraph_tags().contains(&tag)
    }
}

static WORDPROCESSING_ML: WordprocessingMl = WordprocessingMl;
static OPEN_DOCUMENT_TEXT: OpenDocumentText = OpenDocumentText;

/// Every known format, most common first
pub fn known_formats() -> [&'static dyn PackageFormat; 2] {
    [&WORDPROCESSING_ML, &OPEN_DOCUMENT_TEXT]
}

/// Pick the adapter for a container by its entry names
pub fn detect_format(entry_names: &[&str]) -> Option<&'static dyn PackageFormat> {
    known_formats()
        .into_iter()
        .find(|format| format.detect(entry_names))
}

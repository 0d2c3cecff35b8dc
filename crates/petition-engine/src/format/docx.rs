//! Office Open XML word-processing packages (`.docx`)

use super::{PackageFormat, PackageKind};

pub const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML layout: text lives in `w:t` elements inside `w:r` runs
#[derive(Debug, Clone, Copy, Default)]
pub struct WordprocessingMl;

impl PackageFormat for WordprocessingMl {
    fn kind(&self) -> PackageKind {
        PackageKind::Docx
    }

    fn detect(&self, entry_names: &[&str]) -> bool {
        entry_names.contains(&DOCUMENT_PART)
    }

    fn primary_part(&self) -> &'static str {
        DOCUMENT_PART
    }

    fn is_text_part(&self, name: &str) -> bool {
        if name == DOCUMENT_PART || name == "word/footnotes.xml" || name == "word/endnotes.xml" {
            return true;
        }
        // word/header1.xml, word/footer2.xml, ...
        ["word/header", "word/footer"].iter().any(|prefix| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(".xml"))
                .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
        })
    }

    fn paragraph_tags(&self) -> &'static [&'static str] {
        &["w:p"]
    }

    fn text_tag(&self) -> Option<&'static str> {
        Some("w:t")
    }

    fn line_break_tags(&self) -> &'static [&'static str] {
        &["w:br", "w:cr"]
    }

    fn tab_tags(&self) -> &'static [&'static str] {
        &["w:tab"]
    }
}

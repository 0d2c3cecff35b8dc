//! OpenDocument text packages (`.odt`)

use super::{PackageFormat, PackageKind};

pub const CONTENT_PART: &str = "content.xml";

/// ODF layout: character data sits directly in `text:p`/`text:h`, possibly
/// wrapped in `text:span` for formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenDocumentText;

impl PackageFormat for OpenDocumentText {
    fn kind(&self) -> PackageKind {
        PackageKind::Odt
    }

    fn detect(&self, entry_names: &[&str]) -> bool {
        entry_names.contains(&CONTENT_PART) && entry_names.contains(&"mimetype")
    }

    fn primary_part(&self) -> &'static str {
        CONTENT_PART
    }

    fn is_text_part(&self, name: &str) -> bool {
        // Header and footer text is stored with the master pages in styles.xml
        name == CONTENT_PART || name == "styles.xml"
    }

    fn paragraph_tags(&self) -> &'static [&'static str] {
        &["text:p", "text:h"]
    }

    fn text_tag(&self) -> Option<&'static str> {
        None
    }

    fn line_break_tags(&self) -> &'static [&'static str] {
        &["text:line-break"]
    }

    fn tab_tags(&self) -> &'static [&'static str] {
        &["text:tab"]
    }

    fn space_tags(&self) -> &'static [&'static str] {
        &["text:s"]
    }
}

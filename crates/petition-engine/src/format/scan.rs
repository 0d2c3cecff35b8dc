//! Locating text runs in package markup by byte offset
//!
//! The merge engine rewrites markup in place, so it needs the exact byte
//! ranges of character data rather than a parsed tree. The reader's
//! position is recorded before each event to get them. The scan is lenient: it never
//! fails, end tags need not match, and a syntax error ends the scan with
//! the spans found so far.

use std::ops::Range;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::PackageFormat;

/// Character data ranges grouped by paragraph, in document order
pub type ParagraphSpans = Vec<Vec<Range<usize>>>;

/// Collect the character data that counts as document text, per paragraph
pub fn paragraph_spans(xml: &str, format: &dyn PackageFormat) -> ParagraphSpans {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    // Word processors leave unbalanced runs behind; keep going past them
    reader.check_end_names(false);

    let mut finished: ParagraphSpans = Vec::new();
    // Open paragraphs; nested ones (text boxes) get their own group
    let mut open: Vec<Vec<Range<usize>>> = Vec::new();
    let mut text_depth = 0usize;
    let text_tag = format.text_tag();

    loop {
        let start = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let counts = text_tag.is_none() || text_depth > 0;
                if counts && !t.is_empty() {
                    if let Some(paragraph) = open.last_mut() {
                        paragraph.push(start..start + t.len());
                    }
                }
            }
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = std::str::from_utf8(name.as_ref()).unwrap_or_default();
                if format.is_paragraph(name) {
                    open.push(Vec::new());
                } else if Some(name) == text_tag {
                    text_depth += 1;
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let name = std::str::from_utf8(name.as_ref()).unwrap_or_default();
                if format.is_paragraph(name) {
                    if let Some(paragraph) = open.pop() {
                        finished.push(paragraph);
                    }
                } else if Some(name) == text_tag {
                    text_depth = text_depth.saturating_sub(1);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    // Unterminated paragraphs still carry text worth substituting
    finished.extend(open);
    finished
}

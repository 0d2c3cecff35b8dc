//! Structural text walk over package markup

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::PackageError;
use crate::format::PackageFormat;

/// Walk a markup part and render its text
///
/// Paragraph ends and line breaks become `\n`, tabs become `\t`. Fails on
/// malformed markup so the caller can move on to the pattern scan.
pub fn walk_part(xml: &str, format: &dyn PackageFormat) -> Result<String, PackageError> {
    let mut reader = Reader::from_str(xml);
    // Keep whitespace: runs like "Sr. " rely on xml:space="preserve"
    reader.trim_text(false);

    let mut out = String::new();
    let mut paragraph_depth = 0usize;
    let mut text_depth = 0usize;
    let text_tag = format.text_tag().map(str::as_bytes);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let name = name.as_ref();
                if is_one_of(name, format.paragraph_tags()) {
                    paragraph_depth += 1;
                } else if Some(name) == text_tag {
                    text_depth += 1;
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = name.as_ref();
                if paragraph_depth == 0 && !is_one_of(name, format.paragraph_tags()) {
                    continue;
                }
                if is_one_of(name, format.paragraph_tags()) || is_one_of(name, format.line_break_tags()) {
                    out.push('\n');
                } else if is_one_of(name, format.tab_tags()) {
                    out.push('\t');
                } else if is_one_of(name, format.space_tags()) {
                    out.push(' ');
                }
            }
            Event::End(e) => {
                let name = e.name();
                let name = name.as_ref();
                if is_one_of(name, format.paragraph_tags()) {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    out.push('\n');
                } else if Some(name) == text_tag {
                    text_depth = text_depth.saturating_sub(1);
                }
            }
            Event::Text(t) => {
                if counts(paragraph_depth, text_depth, text_tag.is_some()) {
                    match t.unescape() {
                        Ok(text) => out.push_str(&text),
                        Err(_) => out.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Event::CData(t) => {
                if counts(paragraph_depth, text_depth, text_tag.is_some()) {
                    out.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn counts(paragraph_depth: usize, text_depth: usize, has_text_tag: bool) -> bool {
    paragraph_depth > 0 && (!has_text_tag || text_depth > 0)
}

fn is_one_of(name: &[u8], tags: &[&str]) -> bool {
    tags.iter().any(|tag| tag.as_bytes() == name)
}

/// Tidy extracted text: at most one blank line in a row, no trailing
/// spaces on blank lines, trimmed ends
pub fn normalize_extracted(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            lines.push("");
        } else {
            blank_run = 0;
            lines.push(line.trim_end());
        }
    }

    lines.join("\n").trim().to_string()
}

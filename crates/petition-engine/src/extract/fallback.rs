//! Pattern-based text scan for markup the structural walk rejected

use lazy_static::lazy_static;
use regex::Regex;

use crate::format::markup::unescape_text;

lazy_static! {
    /// Contents of text-bearing elements, or the end of a paragraph
    static ref TEXT_ELEMENT: Regex = Regex::new(
        r"<(?:w:t|text:p|text:h|text:span)(?:\s[^>]*)?>([^<]*)|</(?:w:p|text:p|text:h)>"
    )
    .unwrap();

    /// Quoted text attributes: `"text": "..."` in serialized editor state,
    /// `text="..."` in attribute-style markup
    static ref QUOTED_TEXT: Regex = Regex::new(
        r#""text"\s*:\s*"((?:[^"\\]|\\.)*)"|\btext="([^"]*)""#
    )
    .unwrap();
}

/// Scan raw markup for anything that looks like document text
pub fn scan_markup(raw: &str) -> String {
    let mut out = String::new();

    for caps in TEXT_ELEMENT.captures_iter(raw) {
        match caps.get(1) {
            Some(text) => out.push_str(&unescape_text(text.as_str())),
            None => out.push('\n'),
        }
    }

    if !out.trim().is_empty() {
        return out;
    }

    let segments: Vec<String> = QUOTED_TEXT
        .captures_iter(raw)
        .filter_map(|caps| {
            if let Some(json) = caps.get(1) {
                Some(unescape_json(json.as_str()))
            } else {
                caps.get(2).map(|attr| unescape_text(attr.as_str()).into_owned())
            }
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    segments.join("\n")
}

/// Decode a JSON string body; keep it raw if the escapes are broken
fn unescape_json(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", body)).unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_broken_docx_markup() {
        // Unclosed run: the structural walk gives up on this
        let raw = r#"<w:p><w:r><w:t>Ana</w:t><w:t xml:space="preserve"> &amp; Bia</w:r></w:p><w:p><w:t>fim"#;
        assert_eq!(scan_markup(raw), "Ana & Bia\nfim");
    }

    #[test]
    fn test_scan_serialized_editor_state() {
        let raw = r#"{"sections":[{"blocks":[{"inlines":[{"text":"Excelentíssimo"}]},{"inlines":[{"text":"Senhor \"Juiz\""}]}]}]}"#;
        assert_eq!(scan_markup(raw), "Excelentíssimo\nSenhor \"Juiz\"");
    }

    #[test]
    fn test_scan_text_attributes() {
        let raw = r#"<node text="Ol&#225;"/><node text=""/><node text="mundo"/>"#;
        assert_eq!(scan_markup(raw), "Olá\nmundo");
    }

    #[test]
    fn test_scan_nothing() {
        assert_eq!(scan_markup("no markup at all"), "");
        assert_eq!(scan_markup(""), "");
    }
}

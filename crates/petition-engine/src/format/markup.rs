//! Moving text in and out of package markup

use std::borrow::Cow;

use quick_xml::escape::{escape, unescape};

/// Whether `c` may appear in an XML 1.0 document at all
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Drop characters XML cannot carry
///
/// Vertical tab and form feed (manual line and page breaks pasted from a
/// word processor) become spaces so the words around them stay apart.
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .filter_map(|c| match c {
                '\u{B}' | '\u{C}' => Some(' '),
                c if is_xml_char(c) => Some(c),
                _ => None,
            })
            .collect(),
    )
}

/// Prepare a value for writing into a text node
pub fn escape_text(text: &str) -> String {
    escape(&xml_safe(text)).into_owned()
}

/// Resolve entity and character references; text with broken references
/// is returned as written
pub fn unescape_text(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

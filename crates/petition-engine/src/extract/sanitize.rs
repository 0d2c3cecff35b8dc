//! Removal of invisible control characters from extracted text

/// Directionality marks, embeddings, isolates and Unicode line/paragraph
/// separators. Editors render them as garbage or reorder text around them.
fn is_stripped(c: char) -> bool {
    matches!(
        c,
        '\u{061C}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{FEFF}'
    )
}

/// Strip directionality and separator control characters
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !is_stripped(*c)).collect()
}

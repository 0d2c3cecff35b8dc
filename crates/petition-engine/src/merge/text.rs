//! Placeholder substitution in plain text

use regex::Regex;

use crate::placeholders::PlaceholderMap;

/// Replace every registered `[[KEY]]` token in a text template
///
/// Only keys registered in the map are matched; any other bracket pair,
/// balanced or not, is left exactly as written.
///
/// # Example
/// ```
/// use petition_engine::merge::merge_text;
/// use petition_engine::placeholders::build_placeholder_map;
/// use shared_types::ClientRecord;
///
/// let record = ClientRecord {
///     full_name: Some("ANA SILVA".to_string()),
///     ..Default::default()
/// };
/// let map = build_placeholder_map(&record);
/// assert_eq!(merge_text("Eu, [[NOME COMPLETO]] [[outro]]", &map), "Eu, ANA SILVA [[outro]]");
/// ```
pub fn merge_text(template: &str, map: &PlaceholderMap) -> String {
    match map.token_pattern() {
        Some(pattern) => replace_tokens(template, &pattern, map).0,
        None => template.to_string(),
    }
}

/// Substitute matches of a token pattern; returns the text and the number
/// of tokens replaced
pub(crate) fn replace_tokens(text: &str, pattern: &Regex, map: &PlaceholderMap) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(value) = map.get(key.as_str()) else {
            continue;
        };

        out.push_str(&text[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
        count += 1;
    }

    out.push_str(&text[last..]);
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholders::build_placeholder_map;
    use pretty_assertions::assert_eq;
    use shared_types::ClientRecord;

    fn ana() -> ClientRecord {
        ClientRecord {
            full_name: Some("ANA SILVA".to_string()),
            nationality: Some("brasileira".to_string()),
            cpf_cnpj: Some("12345678900".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_qualification() {
        let map = build_placeholder_map(&ana());
        let merged = merge_text("[[NOME COMPLETO]], [[nacionalidade]], CPF [[CPF]]", &map);

        assert_eq!(merged, "ANA SILVA, brasileira, CPF 12345678900");
    }

    #[test]
    fn test_missing_field_is_blank() {
        let mut record = ana();
        record.cpf_cnpj = None;
        let map = build_placeholder_map(&record);
        let merged = merge_text("[[NOME COMPLETO]], [[nacionalidade]], CPF [[CPF]]", &map);

        assert_eq!(merged, "ANA SILVA, brasileira, CPF ");
    }

    #[test]
    fn test_accent_and_case_variants() {
        let record = ClientRecord {
            nationality: Some("brasileira".to_string()),
            profession: Some("advogada".to_string()),
            ..Default::default()
        };
        let map = build_placeholder_map(&record);
        let merged = merge_text(
            "[[NACIONALIDADE]] / [[nacionalidade]] / [[nação]] / [[Profissao]] / [[PROFISSÃO]]",
            &map,
        );

        assert_eq!(merged, "brasileira / brasileira / [[nação]] / advogada / advogada");
    }

    #[test]
    fn test_unbalanced_brackets_untouched() {
        let map = build_placeholder_map(&ana());
        let template = "[[nome [[ ]] [[CPF] [CPF]] [[[CPF]]] ]]";
        let merged = merge_text(template, &map);

        assert_eq!(merged, "[[nome [[ ]] [[CPF] [CPF]] [12345678900] ]]");
    }

    #[test]
    fn test_empty_map_returns_template() {
        let map = PlaceholderMap::new();
        assert_eq!(merge_text("[[nome]]", &map), "[[nome]]");
    }

    #[test]
    fn test_replace_tokens_counts() {
        let map = build_placeholder_map(&ana());
        let pattern = map.token_pattern().unwrap();
        let (text, count) = replace_tokens("[[nome]] e [[nome]] e [[x]]", &pattern, &map);

        assert_eq!(text, "ANA SILVA e ANA SILVA e [[x]]");
        assert_eq!(count, 2);
    }
}

//! Placeholder key normalization
//!
//! Placeholder keys are written by hand in templates, with or without
//! accents and in any case. Everything here is a total function over `&str`.

/// Map a letter with a diacritic to its base letter
///
/// Covers Latin-1 Supplement and Latin Extended-A, which is every accented
/// letter Portuguese (and its neighbours) needs.
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ď' | 'Đ' | 'Ð' => "D",
        'ď' | 'đ' | 'ð' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ÿ' | 'Ŷ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Strip diacritics from every Latin letter, leaving other characters alone
pub fn strip_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match fold_char(c) {
            Some(base) => out.push_str(base),
            None => out.push(c),
        }
    }
    out
}

/// The lookup form of a placeholder key
///
/// Trims, collapses inner whitespace, strips diacritics and upper-cases, so
/// `" Profissão "` and `"PROFISSAO"` normalize to the same key.
pub fn normalize_key(key: &str) -> String {
    let collapsed = key.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_diacritics(&collapsed).to_uppercase()
}

/// The four spellings registered for every key: as written, upper-cased,
/// without diacritics, and without diacritics upper-cased.
pub fn key_variants(key: &str) -> [String; 4] {
    let stripped = strip_diacritics(key);
    [
        key.to_string(),
        key.to_uppercase(),
        stripped.clone(),
        stripped.to_uppercase(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_diacritics_portuguese() {
        assert_eq!(strip_diacritics("Profissão"), "Profissao");
        assert_eq!(strip_diacritics("Endereço Número"), "Endereco Numero");
        assert_eq!(strip_diacritics("ÁÉÍÓÚ âêô ãõ ç"), "AEIOU aeo ao c");
    }

    #[test]
    fn test_strip_diacritics_leaves_other_text() {
        assert_eq!(strip_diacritics("CPF/CNPJ [[x]] 123"), "CPF/CNPJ [[x]] 123");
        assert_eq!(strip_diacritics("日本"), "日本");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("nacionalidade"), "NACIONALIDADE");
        assert_eq!(normalize_key("  Estado   Civil "), "ESTADO CIVIL");
        assert_eq!(normalize_key("profissão"), normalize_key("PROFISSAO"));
    }

    #[test]
    fn test_key_variants() {
        let variants = key_variants("profissão");
        assert_eq!(variants[0], "profissão");
        assert_eq!(variants[1], "PROFISSÃO");
        assert_eq!(variants[2], "profissao");
        assert_eq!(variants[3], "PROFISSAO");
    }
}

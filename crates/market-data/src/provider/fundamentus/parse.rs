//! Label and number parsing for the Fundamentus detail page.

/// Normalize a table label into a lookup key.
///
/// Lowercases, folds Portuguese accents, maps every run of non-alphanumeric
/// characters to a single `_` and trims underscores at both ends, so
/// `"Div Br/ Patrim"` becomes `div_br_patrim` and `"?ROE"` becomes `roe`.
pub(crate) fn normalize_label(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    key
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// Parse a value cell in Brazilian number format.
///
/// Accepts thousands separators (`.`), decimal commas, and `%` / `R$`
/// decorations. Returns `Ok(None)` for the provider's "no value" markers
/// (`-`, empty, `N/A`) and `Err` with the offending text when the cell holds
/// something that is not a number.
pub(crate) fn parse_br_number(raw: &str) -> Result<Option<f64>, String> {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%')
        .collect();

    if cleaned.is_empty() || cleaned == "-" || cleaned.eq_ignore_ascii_case("n/a") {
        return Ok(None);
    }

    let numeric = cleaned.replace('.', "").replace(',', ".");
    match numeric.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label_variants() {
        assert_eq!(normalize_label("?ROE"), "roe");
        assert_eq!(normalize_label("Div Br/ Patrim"), "div_br_patrim");
        assert_eq!(normalize_label("Dív. Líquida/EBITDA"), "div_liquida_ebitda");
        assert_eq!(normalize_label("Cres. Rec (5a)"), "cres_rec_5a");
        assert_eq!(normalize_label("Vol $ méd (2m)"), "vol_med_2m");
        assert_eq!(normalize_label("  P/VP:  "), "p_vp");
    }

    #[test]
    fn test_parse_percentages_and_decimals() {
        assert_eq!(parse_br_number("15,3%"), Ok(Some(15.3)));
        assert_eq!(parse_br_number("-3,2%"), Ok(Some(-3.2)));
        assert_eq!(parse_br_number("0,00"), Ok(Some(0.0)));
        assert_eq!(parse_br_number("R$ 12,50"), Ok(Some(12.5)));
    }

    #[test]
    fn test_parse_thousands_separators() {
        assert_eq!(parse_br_number("1.234.567"), Ok(Some(1_234_567.0)));
        assert_eq!(parse_br_number("1.234,5"), Ok(Some(1234.5)));
    }

    #[test]
    fn test_parse_missing_markers() {
        assert_eq!(parse_br_number("-"), Ok(None));
        assert_eq!(parse_br_number(""), Ok(None));
        assert_eq!(parse_br_number("  "), Ok(None));
        assert_eq!(parse_br_number("N/A"), Ok(None));
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert_eq!(parse_br_number("abc"), Err("abc".to_string()));
        assert_eq!(parse_br_number("12,3x"), Err("12,3x".to_string()));
        assert!(parse_br_number("inf").is_err());
        assert!(parse_br_number("NaN").is_err());
    }
}

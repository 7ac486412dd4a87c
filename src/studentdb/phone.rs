//! Phone number normalization.
//!
//! Every ingestion point (add, import, update, and phone searches) runs raw
//! input through [`normalize_phone`] exactly once before validating it.

/// Reduces free-form phone input to digits, keeping `x`/`X` extension markers
/// as typed. A leading country code `1` is dropped when the cleaned number is
/// longer than ten characters.
pub fn normalize_phone(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, 'x' | 'X'))
        .collect();

    match cleaned.strip_prefix('1') {
        Some(rest) if cleaned.len() > 10 => rest.to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_phone;

    #[test]
    fn strips_country_code_and_punctuation() {
        assert_eq!(normalize_phone("1 (555) 123-4567"), "5551234567");
        assert_eq!(normalize_phone("+1-555-123-4567"), "5551234567");
    }

    #[test]
    fn keeps_ten_digit_numbers_intact() {
        assert_eq!(normalize_phone("555-123-4567"), "5551234567");
        assert_eq!(normalize_phone("(155) 512-3456"), "1555123456");
    }

    #[test]
    fn preserves_extension_marker() {
        assert_eq!(normalize_phone("555.123.4567 x89"), "5551234567x89");
        assert_eq!(normalize_phone("1-555-123-4567 X2"), "5551234567X2");
    }

    #[test]
    fn only_drops_a_leading_one() {
        assert_eq!(normalize_phone("25551234567"), "25551234567");
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("() - ."), "");
    }
}

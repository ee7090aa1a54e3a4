use crate::constants::is_null_sentinel;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;
const NATIONAL_NUMBER_DIGITS: usize = 10;

/// Normalize a raw phone cell into a bare digit string.
///
/// This is a heuristic cleaner, not E.164 validation:
/// 1. empty values and null sentinels are rejected
/// 2. every character other than ASCII `0`-`9` is stripped, then leading zeros
/// 3. numbers longer than ten digits lose a leading US trunk `1`
/// 4. numbers still longer than ten digits lose a leading `91` / `92`
/// 5. the result is accepted when it has 7 to 15 digits
///
/// Digits from other scripts (Arabic-Indic, fullwidth, ...) count as
/// formatting and are dropped, so a number written entirely in them is
/// rejected. Output is always plain ASCII.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_null_sentinel(trimmed) {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    let mut cleaned = digits.trim_start_matches('0');

    if cleaned.len() > NATIONAL_NUMBER_DIGITS && cleaned.starts_with('1') {
        cleaned = &cleaned[1..];
    }
    if cleaned.len() > NATIONAL_NUMBER_DIGITS
        && (cleaned.starts_with("91") || cleaned.starts_with("92"))
    {
        cleaned = &cleaned[2..];
    }

    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&cleaned.len()) {
        Some(cleaned.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_formatting_and_us_trunk_code() {
        assert_eq!(normalize_phone("+1 (555) 123-4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone("555.123.4567").as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_rejects_non_numeric_and_short_values() {
        assert_eq!(normalize_phone("abc"), None);
        assert_eq!(normalize_phone("123"), None);
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("   "), None);
    }

    #[test]
    fn test_only_ascii_digits_are_kept() {
        assert_eq!(normalize_phone("٥٥٥١٢٣٤٥٦٧"), None);
        assert_eq!(normalize_phone("５５５１２３４５６７"), None);
        assert_eq!(normalize_phone("555１2345678").as_deref(), Some("5552345678"));
    }

    #[test]
    fn test_rejects_null_sentinels() {
        assert_eq!(normalize_phone("NULL"), None);
        assert_eq!(normalize_phone("undefined"), None);
        assert_eq!(normalize_phone("NaN"), None);
    }

    #[test]
    fn test_strips_leading_zeros() {
        assert_eq!(normalize_phone("005551234567").as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_strips_91_and_92_country_prefixes() {
        assert_eq!(normalize_phone("+91 98765 43210").as_deref(), Some("9876543210"));
        assert_eq!(normalize_phone("923001234567").as_deref(), Some("3001234567"));
        // ten digits starting with 91 is left alone
        assert_eq!(normalize_phone("9123456789").as_deref(), Some("9123456789"));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(normalize_phone("5551234").as_deref(), Some("5551234"));
        assert_eq!(normalize_phone("555123"), None);
        assert_eq!(normalize_phone("234567890123456").as_deref(), Some("234567890123456"));
        assert_eq!(normalize_phone("2345678901234567"), None);
    }

    #[test]
    fn test_idempotent_on_cleaned_values() {
        for raw in ["+1 (555) 123-4567", "0044 20 7946 0958", "+91 98765 43210", "555-1234"] {
            let once = normalize_phone(raw).unwrap();
            assert_eq!(normalize_phone(&once).as_deref(), Some(once.as_str()));
        }
    }
}

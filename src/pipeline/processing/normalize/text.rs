/// Trim a free-text value and replace commas with spaces so it can sit in a
/// comma-delimited output without quoting.
pub fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    raw.trim().replace(',', " ")
}

/// Trim and uppercase a DNC marker
pub fn clean_flag(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("  123 Main St  "), "123 Main St");
        assert_eq!(clean_text("Austin, TX"), "Austin  TX");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_clean_flag() {
        assert_eq!(clean_flag(" y "), "Y");
        assert_eq!(clean_flag("false"), "FALSE");
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::is_null_sentinel;

static MULTI_VALUE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|\n\r]+").expect("separator pattern is valid"));

/// Split a delimiter-joined cell into its candidate values.
///
/// Pieces are trimmed; empty pieces and null sentinels are dropped. Order is
/// preserved, and downstream "first" always means the first survivor here.
pub fn split_multiple(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    MULTI_VALUE_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && !is_null_sentinel(piece))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_mixed_separators() {
        assert_eq!(split_multiple("a, b;; c|NULL"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_on_newlines() {
        assert_eq!(
            split_multiple("555-123-4567\r\n555-987-6543\n"),
            vec!["555-123-4567", "555-987-6543"]
        );
    }

    #[test]
    fn test_split_preserves_order_and_duplicates() {
        assert_eq!(split_multiple("y|n|y"), vec!["y", "n", "y"]);
    }

    #[test]
    fn test_split_empty_and_sentinel_only() {
        assert!(split_multiple("").is_empty());
        assert!(split_multiple(" ; , | ").is_empty());
        assert!(split_multiple("undefined|nan|Null").is_empty());
    }
}

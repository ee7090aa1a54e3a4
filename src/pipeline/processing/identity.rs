use serde::Serialize;
use std::fmt;

use super::columns::ColumnLayout;
use super::normalize::clean_text;
use crate::types::RawRow;

/// Exact-match identity: cleaned, uppercased first and last name.
///
/// Kept as a pair rather than a joined string so no name content can collide
/// with the separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IdentityKey {
    pub first: String,
    pub last: String,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.first, self.last)
    }
}

impl IdentityKey {
    /// Build a key from raw name values; `None` when either part is blank
    pub fn from_names(first: &str, last: &str) -> Option<Self> {
        let first = clean_text(first).to_uppercase();
        let last = clean_text(last).to_uppercase();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some(Self { first, last })
    }
}

/// Resolve the aggregation key of a row. Rows without both identity columns
/// populated resolve to `None` and are skipped entirely.
pub fn resolve_key(row: &RawRow, layout: &ColumnLayout) -> Option<IdentityKey> {
    let first = layout.first_name.map(|i| row.get(i)).unwrap_or("");
    let last = layout.last_name.map(|i| row.get(i)).unwrap_or("");
    IdentityKey::from_names(first, last)
}

/// One data line of the input table.
///
/// Values are positional and line up with the header the row source was opened
/// with. Short rows are padded by `get` returning an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Zero-based position of this row in the input (header excluded)
    pub index: usize,
    pub values: Vec<String>,
}

impl RawRow {
    pub fn new(index: usize, values: Vec<String>) -> Self {
        Self { index, values }
    }

    /// Value at column position `column`, or "" when the row is short
    pub fn get(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

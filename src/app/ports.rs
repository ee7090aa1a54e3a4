use crate::error::Result;
use crate::pipeline::processing::project::OutputTable;
use crate::types::RawRow;

/// Source of header-bearing rows
pub trait RowSourcePort {
    /// Header names as declared by the input, in column order
    fn headers(&self) -> &[String];

    /// Next data row; `None` once the input is exhausted
    fn next_row(&mut self) -> Option<Result<RawRow>>;

    /// Where the rows come from, for log lines
    fn describe(&self) -> String;
}

/// Destination of the cleaned table
pub trait TableSinkPort {
    fn write_table(&mut self, table: &OutputTable) -> Result<()>;

    fn describe(&self) -> String;
}

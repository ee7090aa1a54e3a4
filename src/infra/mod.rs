pub mod csv_row_source;
pub mod csv_table_sink;

pub use csv_row_source::CsvRowSource;
pub use csv_table_sink::CsvTableSink;

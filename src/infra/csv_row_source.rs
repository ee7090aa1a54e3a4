use csv::{ByteRecord, Reader, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::app::ports::RowSourcePort;
use crate::error::{CleanerError, Result};
use crate::types::RawRow;

/// Row source over a header-bearing CSV stream.
///
/// Rows may be shorter or longer than the header. Cells that are not valid
/// UTF-8 are decoded lossily rather than failing the run.
pub struct CsvRowSource<R: Read> {
    reader: Reader<R>,
    headers: Vec<String>,
    origin: String,
    record: ByteRecord,
    next_index: usize,
}

impl CsvRowSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Read the header line eagerly; a missing or blank header is fatal
    pub fn from_reader(reader: R, origin: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        if headers.iter().all(String::is_empty) {
            return Err(CleanerError::MissingHeader {
                path: origin.to_string(),
            });
        }
        debug!("Opened {} with {} columns", origin, headers.len());

        Ok(Self {
            reader,
            headers,
            origin: origin.to_string(),
            record: ByteRecord::new(),
            next_index: 0,
        })
    }
}

impl<R: Read> RowSourcePort for CsvRowSource<R> {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_row(&mut self) -> Option<Result<RawRow>> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => {
                let values = self
                    .record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned())
                    .collect();
                let row = RawRow::new(self.next_index, values);
                self.next_index += 1;
                Some(Ok(row))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}

use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use uuid::Uuid;

use crate::app::ports::TableSinkPort;
use crate::error::{CleanerError, Result};
use crate::pipeline::processing::project::OutputTable;

/// Writes the table to a CSV file through a sibling temp file, so a failed
/// write never leaves a partial output behind.
pub struct CsvTableSink {
    path: PathBuf,
}

impl CsvTableSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.csv".to_string());
        let temp = format!(".{}.{}.tmp", name, Uuid::new_v4().simple());
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(temp),
            _ => PathBuf::from(temp),
        }
    }

    fn write_to(&self, temp: &Path, table: &OutputTable) -> Result<()> {
        let mut writer = Writer::from_path(temp)?;
        writer.write_record(&table.headers)?;
        for record in table.records() {
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn output_error(&self, e: impl std::fmt::Display) -> CleanerError {
        CleanerError::Output {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl TableSinkPort for CsvTableSink {
    fn write_table(&mut self, table: &OutputTable) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.output_error(e))?;
        }

        let temp = self.temp_path();
        debug!("Writing {} rows to {}", table.len(), temp.display());

        let written = self
            .write_to(&temp, table)
            .and_then(|_| fs::rename(&temp, &self.path).map_err(CleanerError::from));

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp) {
                error!("Failed to remove temp file {}: {}", temp.display(), cleanup);
            }
            return Err(self.output_error(e));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

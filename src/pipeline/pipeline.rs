use std::path::Path;
use tracing::{error, info, instrument};

use crate::app::clean_use_case::{CleanUseCase, RunSummary};
use crate::app::ports::RowSourcePort;
use crate::config::ColumnsConfig;
use crate::error::Result;
use crate::infra::{CsvRowSource, CsvTableSink};
use crate::pipeline::pipeline_config::PipelineConfig;
use crate::pipeline::processing::columns::{ColumnLayout, ColumnSpec};

/// File-to-file entry points wiring the CSV adapters to the clean use case
pub struct Pipeline;

impl Pipeline {
    /// Clean `input` into `output` under the configured schema variant.
    ///
    /// A run that finds no people succeeds without creating `output`.
    #[instrument(skip(config), fields(variant = %config.variant))]
    pub fn run(input: &Path, output: &Path, config: &PipelineConfig) -> Result<RunSummary> {
        info!("📖 Reading input file: {}", input.display());

        let result = CleanUseCase::new(config.clone()).and_then(|use_case| {
            let mut source = CsvRowSource::open(input)?;
            let mut sink = CsvTableSink::new(output);
            use_case.execute(&mut source, &mut sink)
        });

        match &result {
            Ok(summary) if summary.output_written => {
                info!("✅ Returning {} cleaned rows", summary.rows_written);
                info!("🎉 Done! Output written to {}", output.display());
            }
            Ok(_) => info!("🏁 Done. No output file written"),
            Err(e) => error!("❌ Cleaning {} failed: {}", input.display(), e),
        }
        result
    }

    /// Resolve the column roles of an input header without reading any rows
    pub fn inspect_columns(input: &Path, columns: &ColumnsConfig) -> Result<Vec<ColumnSpec>> {
        let source = CsvRowSource::open(input)?;
        let layout = ColumnLayout::from_headers(source.headers(), columns);
        Ok(layout.columns)
    }
}

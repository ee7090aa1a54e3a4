use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

use crate::app::ports::{RowSourcePort, TableSinkPort};
use crate::error::{CleanerError, Result};
use crate::observability::metrics;
use crate::pipeline::pipeline_config::{PipelineConfig, SchemaVariant};
use crate::pipeline::processing::aggregator::{AggregationStats, Aggregator};
use crate::pipeline::processing::columns::ColumnLayout;
use crate::pipeline::processing::project::project;

/// Outcome of one cleaning run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub variant: SchemaVariant,
    pub input: String,
    pub columns_found: usize,
    #[serde(flatten)]
    pub stats: AggregationStats,
    pub unique_people: usize,
    pub rows_written: usize,
    /// False for a zero-output run; nothing is written in that case
    pub output_written: bool,
    pub output: Option<String>,
    pub elapsed_ms: u64,
}

/// Use case for folding a row source into one cleaned row per person
pub struct CleanUseCase {
    config: PipelineConfig,
}

impl CleanUseCase {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read every row, aggregate, project and hand the table to the sink.
    ///
    /// Bad values and rows without identity are dropped. Only structural
    /// failures (no header, unreadable input, failed write) are errors.
    pub fn execute(
        &self,
        source: &mut dyn RowSourcePort,
        sink: &mut dyn TableSinkPort,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        let input = source.describe();

        let headers = source.headers().to_vec();
        if headers.is_empty() {
            return Err(CleanerError::MissingHeader { path: input });
        }
        info!("📋 Found {} columns", headers.len());

        let layout = ColumnLayout::from_headers(&headers, &self.config.columns);
        if !layout.has_identity_columns() {
            warn!(
                "⚠️  Identity columns '{}' / '{}' not found; no rows can be matched",
                self.config.columns.first_name, self.config.columns.last_name
            );
        }

        let mut aggregator = Aggregator::new(layout, self.config.policy);
        while let Some(row) = source.next_row() {
            aggregator.ingest(&row?);

            let seen = aggregator.stats().rows_read;
            if seen % self.config.progress_interval == 0 {
                info!(
                    "   Processed {} rows... ({} people so far)",
                    seen,
                    aggregator.people_seen()
                );
            }
        }

        let (people, stats) = aggregator.finish();
        info!("✅ Processed {} input rows", stats.rows_read);
        info!("📊 Found {} unique people", people.len());

        let table = project(&people, &self.config);
        let mut summary = RunSummary {
            variant: self.config.variant,
            input,
            columns_found: headers.len(),
            unique_people: people.len(),
            stats,
            rows_written: 0,
            output_written: false,
            output: None,
            elapsed_ms: 0,
        };

        if table.is_empty() {
            warn!("⚠️  No output rows to write");
            metrics::output::empty_run();
        } else {
            let destination = sink.describe();
            info!("💾 Writing output file: {}", destination);
            if let Err(e) = sink.write_table(&table) {
                metrics::output::write_failed();
                return Err(e);
            }
            metrics::output::people_emitted(table.len());
            summary.rows_written = table.len();
            summary.output_written = true;
            summary.output = Some(destination);
        }

        let elapsed = started.elapsed();
        metrics::run::finished(elapsed.as_secs_f64(), summary.unique_people);
        summary.elapsed_ms = elapsed.as_millis() as u64;
        Ok(summary)
    }
}

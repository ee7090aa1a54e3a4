//! Run metrics for the cleaner
//!
//! Thin wrappers over the `metrics` facade. No exporter is installed by the
//! binary, so these calls are no-ops unless an embedding service installs a
//! recorder.

use std::fmt;

/// All metric names used by the cleaner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Ingest
    IngestRowsRead,
    IngestRowsSkipped,

    // Normalize
    NormalizePhonesRejected,
    NormalizeEmailsRejected,
    NormalizeTimestampsRejected,

    // Output
    OutputPeopleEmitted,
    OutputEmptyRuns,
    OutputWriteFailures,

    // Run
    RunDuration,
    RunUniquePeople,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::IngestRowsRead => "pixel_cleaner_ingest_rows_read_total",
            MetricName::IngestRowsSkipped => "pixel_cleaner_ingest_rows_skipped_total",

            MetricName::NormalizePhonesRejected => "pixel_cleaner_normalize_phones_rejected_total",
            MetricName::NormalizeEmailsRejected => "pixel_cleaner_normalize_emails_rejected_total",
            MetricName::NormalizeTimestampsRejected => {
                "pixel_cleaner_normalize_timestamps_rejected_total"
            }

            MetricName::OutputPeopleEmitted => "pixel_cleaner_output_people_emitted_total",
            MetricName::OutputEmptyRuns => "pixel_cleaner_output_empty_runs_total",
            MetricName::OutputWriteFailures => "pixel_cleaner_output_write_failures_total",

            MetricName::RunDuration => "pixel_cleaner_run_duration_seconds",
            MetricName::RunUniquePeople => "pixel_cleaner_run_unique_people",
        }
    }
}

pub mod ingest {
    use super::MetricName;

    pub fn row_read() {
        ::metrics::counter!(MetricName::IngestRowsRead.as_str()).increment(1);
    }

    pub fn row_skipped() {
        ::metrics::counter!(MetricName::IngestRowsSkipped.as_str()).increment(1);
    }
}

pub mod normalize {
    use super::MetricName;

    pub fn phone_rejected() {
        ::metrics::counter!(MetricName::NormalizePhonesRejected.as_str()).increment(1);
    }

    pub fn email_rejected() {
        ::metrics::counter!(MetricName::NormalizeEmailsRejected.as_str()).increment(1);
    }

    pub fn timestamp_rejected() {
        ::metrics::counter!(MetricName::NormalizeTimestampsRejected.as_str()).increment(1);
    }
}

pub mod output {
    use super::MetricName;

    pub fn people_emitted(count: usize) {
        ::metrics::counter!(MetricName::OutputPeopleEmitted.as_str()).increment(count as u64);
    }

    pub fn empty_run() {
        ::metrics::counter!(MetricName::OutputEmptyRuns.as_str()).increment(1);
    }

    pub fn write_failed() {
        ::metrics::counter!(MetricName::OutputWriteFailures.as_str()).increment(1);
    }
}

pub mod run {
    use super::MetricName;

    pub fn finished(duration_secs: f64, unique_people: usize) {
        ::metrics::histogram!(MetricName::RunDuration.as_str()).record(duration_secs);
        ::metrics::gauge!(MetricName::RunUniquePeople.as_str()).set(unique_people as f64);
    }
}

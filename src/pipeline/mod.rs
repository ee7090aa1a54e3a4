// Cleaning pipeline: configuration, row processing and the file-to-file run

pub mod pipeline;
pub mod pipeline_config;
pub mod processing;

pub use pipeline::Pipeline;
pub use pipeline_config::{MergePolicy, PipelineConfig, SchemaVariant};

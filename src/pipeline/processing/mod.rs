// Row processing: column roles, normalization, aggregation and projection

pub mod accumulator;
pub mod aggregator;
pub mod columns;
pub mod derive;
pub mod identity;
pub mod normalize;
pub mod project;
pub mod split;

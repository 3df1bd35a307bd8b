//! Aggregation pipeline.
//!
//! Filter and group the raw records, min-max scale the grouped table and
//! derive the heatmap matrix from it.

pub mod aggregator;
pub mod normalizer;
pub mod pivot;

pub use aggregator::aggregate;
pub use normalizer::normalize;
pub use pivot::build_pivot;

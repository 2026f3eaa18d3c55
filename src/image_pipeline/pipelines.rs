//! Pipeline orchestration
//!
//! This module wires readers, the resampler, the comparator, and the writers into
//! the batch operations exposed by the command line.

mod comparison_pipeline;
mod inputs;
mod resize_pipeline;
mod types;

#[cfg(test)]
mod tests;

pub use comparison_pipeline::ComparisonPipeline;
pub use inputs::{ComparisonJob, InputFormat, InputSpec, LabeledImage, OutputFormat};
pub use resize_pipeline::ResizePipeline;
pub use types::{ComparisonConfig, ComparisonConfigBuilder, ResizeConfig, ResizeConfigBuilder};

//! Resampling and resize-quality pipeline
//!
//! This module is split into plane I/O (text dumps, YUV 4:2:0, raster images),
//! the bilinear resampler, the quality comparator, artifact rendering, and the
//! pipelines that orchestrate them.

pub mod artifacts;
pub mod common;
pub mod compare;
pub mod grid;
pub mod pipelines;
pub mod planes;
pub mod resize;

pub use common::{PipelineError, Result, StageTimings};

pub use grid::{Channel, DecodedImage, Grid, Plane, PlaneLayout};

pub use planes::{
    PlaneReader, PlaneWriter, RasterColor, RasterImageReader, TextChannelReader, TextChannelWriter,
    Yuv420Reader, Yuv420Writer, export_channels,
};

pub use resize::{BilinearResampler, DivergenceObserver, DivergenceProbe, Resampler, bilinear_resize};

pub use compare::{ComparisonReport, GridSummary, PairwiseComparison, psnr};

pub use artifacts::{ArtifactFormat, ArtifactWriter, PngArtifactWriter, TiffArtifactWriter, TiffCompression};

pub use pipelines::{
    ComparisonConfig, ComparisonConfigBuilder, ComparisonJob, ComparisonPipeline, InputFormat, InputSpec,
    LabeledImage, OutputFormat, ResizeConfig, ResizeConfigBuilder, ResizePipeline,
};

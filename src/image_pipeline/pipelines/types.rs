//! Pipeline configuration types

use std::path::PathBuf;

use crate::image_pipeline::compare::{DEFAULT_HISTOGRAM_BINS, DEFAULT_HISTOGRAM_RANGE, DEFAULT_THRESHOLDS};
use crate::image_pipeline::resize::DEFAULT_DIVERGENCE_THRESHOLD;

/// Configuration for resizing
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// Target `(width, height)`; `None` keeps the source size
    pub target: Option<(usize, usize)>,
    /// Absolute difference above which a resized sample is reported against the reference
    pub divergence_threshold: f64,
    /// Upper bound on either target dimension
    pub max_dimension: Option<usize>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target: None,
            divergence_threshold: DEFAULT_DIVERGENCE_THRESHOLD,
            max_dimension: Some(50000),
        }
    }
}

impl ResizeConfig {
    pub fn builder() -> ResizeConfigBuilder {
        ResizeConfigBuilder::default()
    }

    /// Target size for an image of `width × height`.
    pub fn target_for(&self, width: usize, height: usize) -> (usize, usize) {
        self.target.unwrap_or((width, height))
    }
}

/// Builder for ResizeConfig
#[derive(Default)]
pub struct ResizeConfigBuilder {
    target: Option<(usize, usize)>,
    divergence_threshold: Option<f64>,
    max_dimension: Option<Option<usize>>,
}

impl ResizeConfigBuilder {
    pub fn target(mut self, width: usize, height: usize) -> Self {
        self.target = Some((width, height));
        self
    }

    pub fn divergence_threshold(mut self, threshold: f64) -> Self {
        self.divergence_threshold = Some(threshold);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ResizeConfig {
        let default = ResizeConfig::default();
        ResizeConfig {
            target: self.target.or(default.target),
            divergence_threshold: self.divergence_threshold.unwrap_or(default.divergence_threshold),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

/// Configuration for quality comparisons
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Absolute-difference thresholds reported as percentages
    pub thresholds: Vec<f64>,
    pub histogram_bins: usize,
    pub histogram_range: (f64, f64),
    /// Directory receiving histogram and heat map artifacts
    pub output_dir: PathBuf,
    pub write_artifacts: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            histogram_range: DEFAULT_HISTOGRAM_RANGE,
            output_dir: PathBuf::from("."),
            write_artifacts: true,
        }
    }
}

impl ComparisonConfig {
    pub fn builder() -> ComparisonConfigBuilder {
        ComparisonConfigBuilder::default()
    }
}

/// Builder for ComparisonConfig
#[derive(Default)]
pub struct ComparisonConfigBuilder {
    thresholds: Option<Vec<f64>>,
    histogram_bins: Option<usize>,
    histogram_range: Option<(f64, f64)>,
    output_dir: Option<PathBuf>,
    write_artifacts: Option<bool>,
}

impl ComparisonConfigBuilder {
    pub fn thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    pub fn histogram_range(mut self, lower: f64, upper: f64) -> Self {
        self.histogram_range = Some((lower, upper));
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn write_artifacts(mut self, enable: bool) -> Self {
        self.write_artifacts = Some(enable);
        self
    }

    pub fn build(self) -> ComparisonConfig {
        let default = ComparisonConfig::default();
        ComparisonConfig {
            thresholds: self.thresholds.unwrap_or(default.thresholds),
            histogram_bins: self.histogram_bins.unwrap_or(default.histogram_bins),
            histogram_range: self.histogram_range.unwrap_or(default.histogram_range),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            write_artifacts: self.write_artifacts.unwrap_or(default.write_artifacts),
        }
    }
}

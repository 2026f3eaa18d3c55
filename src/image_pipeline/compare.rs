//! Resize quality comparison
//!
//! PSNR and difference statistics between a reference resize and a candidate
//! resize, each also summarised against a subsampled native-resolution baseline.

mod baseline;
mod difference;
mod report;
mod stats;


pub use baseline::subsample_baseline;
pub use difference::{DEFAULT_HISTOGRAM_BINS, DEFAULT_HISTOGRAM_RANGE, DifferenceHistogram, DifferenceMap};
pub use report::{ComparisonReport, ImageSummary, PlaneComparison, PlaneSummary};
pub use stats::{
    DEFAULT_THRESHOLDS, GridSummary, PEAK_SAMPLE_VALUE, PairwiseComparison, ThresholdShare, mean,
    mean_squared_error, median, psnr, psnr_from_mse, std_dev,
};

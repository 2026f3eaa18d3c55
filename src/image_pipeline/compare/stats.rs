//! Fidelity statistics over equally shaped grids.

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::compare::difference::DifferenceMap;
use crate::image_pipeline::grid::Grid;

pub const PEAK_SAMPLE_VALUE: f64 = 255.0;

/// Thresholds used for the "pixels differing by more than" percentages.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [0.0, 1.0, 5.0];

pub(crate) fn ensure_same_shape<A, B>(context: &str, a: &Grid<A>, b: &Grid<B>) -> Result<()> {
    if a.same_shape(b) {
        return Ok(());
    }
    Err(PipelineError::dimension_mismatch(
        format!(
            "{context} ({}x{} vs {}x{})",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        ),
        a.len(),
        b.len(),
    ))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Median, averaging the two middle values for even-length input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn mean_squared_error<A, B>(a: &Grid<A>, b: &Grid<B>) -> Result<f64>
where
    A: Copy + Into<f64>,
    B: Copy + Into<f64>,
{
    ensure_same_shape("mean squared error", a, b)?;
    let sum: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| {
            let d = x.into() - y.into();
            d * d
        })
        .sum();
    Ok(sum / a.len() as f64)
}

/// Converts a mean squared error into PSNR against an 8-bit peak.
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    20.0 * (PEAK_SAMPLE_VALUE / mse.sqrt()).log10()
}

/// Peak signal-to-noise ratio of `processed` against `original`, `+inf` when identical.
pub fn psnr<A, B>(original: &Grid<A>, processed: &Grid<B>) -> Result<f64>
where
    A: Copy + Into<f64>,
    B: Copy + Into<f64>,
{
    Ok(psnr_from_mse(mean_squared_error(original, processed)?))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    pub width: usize,
    pub height: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// PSNR against the baseline grid.
    pub psnr: f64,
}

impl GridSummary {
    pub fn of<A, B>(grid: &Grid<A>, baseline: &Grid<B>) -> Result<Self>
    where
        A: Copy + Into<f64>,
        B: Copy + Into<f64>,
    {
        let psnr = psnr(baseline, grid)?;
        let values = grid.to_f64().into_vec();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            min,
            max,
            mean: mean(&values),
            median: median(&values),
            std_dev: std_dev(&values),
            psnr,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdShare {
    pub threshold: f64,
    /// Percentage (0–100) of positions whose absolute difference exceeds `threshold`.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseComparison {
    pub mean_abs: f64,
    pub median_abs: f64,
    pub max_abs: f64,
    /// Standard deviation of the signed difference.
    pub std_signed: f64,
    pub exceeding: Vec<ThresholdShare>,
}

impl PairwiseComparison {
    pub fn between<A, B>(a: &Grid<A>, b: &Grid<B>, thresholds: &[f64]) -> Result<Self>
    where
        A: Copy + Into<f64>,
        B: Copy + Into<f64>,
    {
        Ok(Self::from_map(&DifferenceMap::between(a, b)?, thresholds))
    }

    pub fn from_map(map: &DifferenceMap, thresholds: &[f64]) -> Self {
        let signed = map.signed().as_slice();
        let abs = map.absolute();
        let abs = abs.as_slice();
        let total = abs.len() as f64;

        let exceeding = thresholds
            .iter()
            .map(|&threshold| {
                let over = abs.iter().filter(|&&d| d > threshold).count() as f64;
                ThresholdShare {
                    threshold,
                    percent: if total > 0.0 { over / total * 100.0 } else { 0.0 },
                }
            })
            .collect();

        Self {
            mean_abs: mean(abs),
            median_abs: median(abs),
            max_abs: abs.iter().copied().fold(0.0, f64::max),
            std_signed: std_dev(signed),
            exceeding,
        }
    }
}

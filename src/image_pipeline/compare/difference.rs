use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::compare::stats::ensure_same_shape;
use crate::image_pipeline::grid::Grid;

/// Signed per-position difference `a - b` of two equally shaped grids.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceMap {
    signed: Grid<f64>,
}

impl DifferenceMap {
    pub fn between<A, B>(a: &Grid<A>, b: &Grid<B>) -> Result<Self>
    where
        A: Copy + Into<f64>,
        B: Copy + Into<f64>,
    {
        ensure_same_shape("difference map", a, b)?;
        let data = a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .map(|(&x, &y)| x.into() - y.into())
            .collect();
        Ok(Self {
            signed: Grid::from_vec(a.width(), a.height(), data)?,
        })
    }

    pub fn signed(&self) -> &Grid<f64> {
        &self.signed
    }

    pub fn absolute(&self) -> Grid<f64> {
        self.signed.map(|d| d.abs())
    }

    pub fn width(&self) -> usize {
        self.signed.width()
    }

    pub fn height(&self) -> usize {
        self.signed.height()
    }
}

pub const DEFAULT_HISTOGRAM_BINS: usize = 100;
pub const DEFAULT_HISTOGRAM_RANGE: (f64, f64) = (-10.0, 10.0);

/// Equal-width histogram of signed differences over a fixed range.
///
/// Values outside the range are dropped; the upper edge belongs to the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceHistogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<u64>,
}

impl DifferenceHistogram {
    pub fn from_map(map: &DifferenceMap, bins: usize, (lower, upper): (f64, f64)) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![0u64; bins];
        let width = (upper - lower) / bins as f64;
        for &d in map.signed().as_slice() {
            if d < lower || d > upper {
                continue;
            }
            let index = (((d - lower) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }
        Self { lower, upper, counts }
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

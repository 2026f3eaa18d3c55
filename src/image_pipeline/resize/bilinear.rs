//! Align-corners bilinear resampling.
//!
//! The first and last output samples of each axis land exactly on the first
//! and last source samples. Intermediate samples blend the four surrounding
//! source samples, with neighbour indices clamped to the source bounds.
//! Output values are left unclamped; see [`Grid::quantize`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::Grid;
use crate::image_pipeline::resize::resampler::Resampler;

#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearResampler;

impl Resampler for BilinearResampler {
    fn resample(&self, source: &Grid<u8>, height: usize, width: usize) -> Result<Grid<f64>> {
        bilinear_resize(source, height, width)
    }
}

/// Neighbour indices and blend weight for one output coordinate on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    low: usize,
    high: usize,
    weight: f64,
}

/// `(source_len - 1) / (target_len - 1)`, or 0 for a singleton target axis.
fn axis_ratio(source_len: usize, target_len: usize) -> f64 {
    if target_len > 1 {
        (source_len - 1) as f64 / (target_len - 1) as f64
    } else {
        0.0
    }
}

fn axis_taps(source_len: usize, target_len: usize) -> Vec<Tap> {
    let ratio = axis_ratio(source_len, target_len);
    let last = source_len - 1;
    (0..target_len)
        .map(|i| {
            let pos = ratio * i as f64;
            let low = (pos.floor() as usize).min(last);
            let high = (pos.ceil() as usize).min(last);
            Tap {
                low,
                high,
                weight: pos - low as f64,
            }
        })
        .collect()
}

fn fill_row<T: Copy + Into<f64>>(source: &Grid<T>, y: Tap, x_taps: &[Tap], out: &mut [f64]) {
    let top = source.row(y.low);
    let bottom = source.row(y.high);
    let yw = y.weight;
    for (value, x) in out.iter_mut().zip(x_taps) {
        let xw = x.weight;
        let a: f64 = top[x.low].into();
        let b: f64 = top[x.high].into();
        let c: f64 = bottom[x.low].into();
        let d: f64 = bottom[x.high].into();
        *value = a * (1.0 - xw) * (1.0 - yw) + b * xw * (1.0 - yw) + c * yw * (1.0 - xw) + d * xw * yw;
    }
}

/// Resizes `source` to `height × width` with align-corners bilinear interpolation.
///
/// A target axis of length 1 samples source index 0 on that axis.
pub fn bilinear_resize<T>(source: &Grid<T>, height: usize, width: usize) -> Result<Grid<f64>>
where
    T: Copy + Into<f64> + Sync,
{
    if height == 0 || width == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    if source.is_empty() {
        return Err(PipelineError::InvalidDimensions(source.width(), source.height()));
    }

    debug!(
        src_width = source.width(),
        src_height = source.height(),
        width,
        height,
        "Bilinear resize"
    );

    let x_taps = axis_taps(source.width(), width);
    let y_taps = axis_taps(source.height(), height);
    let mut data = vec![0.0f64; width * height];

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(width)
        .zip(y_taps.par_iter())
        .for_each(|(row, &y)| fill_row(source, y, &x_taps, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(width)
        .zip(y_taps.iter())
        .for_each(|(row, &y)| fill_row(source, y, &x_taps, row));

    Grid::from_vec(width, height, data)
}

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::grid::Grid;

pub trait Resampler {
    fn resample(&self, source: &Grid<u8>, height: usize, width: usize) -> Result<Grid<f64>>;
}

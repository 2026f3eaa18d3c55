use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::Grid;

/// Subsamples a native-resolution plane down to `width × height` with integer
/// strides (`H₀ / H`, `W₀ / W`), for use as the PSNR baseline.
pub fn subsample_baseline(original: &Grid<u8>, width: usize, height: usize) -> Result<Grid<u8>> {
    if width == 0 || height == 0 || original.width() < width || original.height() < height {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    let row_step = original.height() / height;
    let col_step = original.width() / width;
    original.strided(row_step, col_step, height, width)
}

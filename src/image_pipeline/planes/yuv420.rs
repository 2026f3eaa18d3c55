//! Raw planar YUV 4:2:0 frames: Y, then Cb, then Cr, 8 bits per sample.

use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::{DecodedImage, Grid, PlaneLayout, sample_count};
use crate::image_pipeline::planes::reader::PlaneReader;
use crate::image_pipeline::planes::writer::PlaneWriter;

/// Byte length of one `width × height` 4:2:0 frame.
pub fn yuv420_frame_len(width: usize, height: usize) -> usize {
    width * height + 2 * (width / 2) * (height / 2)
}

#[derive(Debug, Clone, Copy)]
pub struct Yuv420Reader {
    pub width: usize,
    pub height: usize,
}

impl Yuv420Reader {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl PlaneReader for Yuv420Reader {
    fn read_planes(&self, data: &[u8]) -> Result<DecodedImage> {
        let (w, h) = (self.width, self.height);
        let luma_len = sample_count(w, h)?;
        let chroma_len = sample_count(w / 2, h / 2)?;
        let expected = chroma_len
            .checked_mul(2)
            .and_then(|chroma| chroma.checked_add(luma_len))
            .ok_or(PipelineError::InvalidDimensions(w, h))?;
        if data.len() != expected {
            return Err(PipelineError::dimension_mismatch(
                format!("{w}x{h} YUV 4:2:0 frame"),
                expected,
                data.len(),
            ));
        }

        let (luma, chroma) = data.split_at(luma_len);
        let (cb, cr) = chroma.split_at(chroma_len);
        debug!(width = w, height = h, luma_len, chroma_len, "Splitting YUV 4:2:0 frame");

        DecodedImage::new(
            w,
            h,
            PlaneLayout::Yuv420,
            vec![
                Grid::from_vec(w, h, luma.to_vec())?,
                Grid::from_vec(w / 2, h / 2, cb.to_vec())?,
                Grid::from_vec(w / 2, h / 2, cr.to_vec())?,
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Yuv420Writer;

impl PlaneWriter for Yuv420Writer {
    fn write_planes(&self, image: &DecodedImage, output: &mut dyn Write) -> Result<()> {
        if image.layout() != PlaneLayout::Yuv420 {
            return Err(PipelineError::UnsupportedFormat(format!(
                "cannot write {:?} planes as YUV 4:2:0",
                image.layout()
            )));
        }
        for plane in image.planes() {
            output.write_all(plane.grid.as_slice())?;
        }
        Ok(())
    }
}

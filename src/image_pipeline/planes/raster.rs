//! Raster image decoding (PNG, JPEG, BMP, TIFF, ...) through the `image` crate.

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::{DecodedImage, Grid, PlaneLayout};
use crate::image_pipeline::planes::reader::PlaneReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterColor {
    #[default]
    Rgb,
    /// Full-range BT.601 YCbCr, as used by JPEG.
    YCbCr,
}

/// Full-range BT.601 conversion of one RGB pixel, rounded and clamped to 8 bits.
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    [y, cb, cr].map(|v| v.round().clamp(0.0, 255.0) as u8)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterImageReader {
    pub color: RasterColor,
    /// When set, decoded images must have exactly these `(width, height)`.
    pub expected: Option<(usize, usize)>,
}

impl RasterImageReader {
    pub fn new(color: RasterColor) -> Self {
        Self { color, expected: None }
    }

    pub fn expect_dimensions(mut self, width: usize, height: usize) -> Self {
        self.expected = Some((width, height));
        self
    }
}

impl PlaneReader for RasterImageReader {
    fn read_planes(&self, data: &[u8]) -> Result<DecodedImage> {
        debug!("Decoding raster image, {} bytes", data.len());

        let rgb = image::load_from_memory(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?
            .to_rgb8();
        let width = rgb.width() as usize;
        let height = rgb.height() as usize;

        if let Some((w, h)) = self.expected {
            if (w, h) != (width, height) {
                return Err(PipelineError::dimension_mismatch(
                    format!("raster image ({w}x{h} declared, {width}x{height} decoded)"),
                    w * h,
                    width * height,
                ));
            }
        }

        let mut planes = [
            Vec::with_capacity(width * height),
            Vec::with_capacity(width * height),
            Vec::with_capacity(width * height),
        ];
        for pixel in rgb.pixels() {
            let [r, g, b] = pixel.0;
            let samples = match self.color {
                RasterColor::Rgb => [r, g, b],
                RasterColor::YCbCr => rgb_to_ycbcr(r, g, b),
            };
            for (plane, sample) in planes.iter_mut().zip(samples) {
                plane.push(sample);
            }
        }

        let layout = match self.color {
            RasterColor::Rgb => PlaneLayout::Rgb,
            RasterColor::YCbCr => PlaneLayout::YCbCr,
        };
        let grids = planes
            .into_iter()
            .map(|plane| Grid::from_vec(width, height, plane))
            .collect::<Result<Vec<_>>>()?;

        debug!(width, height, ?layout, "Decoded raster image");
        DecodedImage::new(width, height, layout, grids)
    }
}

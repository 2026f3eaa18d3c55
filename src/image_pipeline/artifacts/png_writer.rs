use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use tracing::debug;

use crate::image_pipeline::artifacts::writer::ArtifactWriter;
use crate::image_pipeline::common::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct PngArtifactWriter;

impl ArtifactWriter for PngArtifactWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_artifact(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNG artifact: {}x{}", image.width(), image.height());
        PngEncoder::new(output)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))
    }
}

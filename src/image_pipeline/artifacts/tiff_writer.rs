use std::io::Write;

use image::RgbImage;
use tiff::encoder::colortype::RGB8;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::artifacts::types::TiffCompression;
use crate::image_pipeline::artifacts::writer::ArtifactWriter;
use crate::image_pipeline::common::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy)]
pub struct TiffArtifactWriter {
    pub compression: TiffCompression,
    /// Horizontal differencing predictor; slows encoding, helps LZW/Deflate on smooth maps.
    pub horizontal_predictor: bool,
}

impl Default for TiffArtifactWriter {
    fn default() -> Self {
        Self {
            compression: TiffCompression::DeflateBalanced,
            horizontal_predictor: false,
        }
    }
}

impl ArtifactWriter for TiffArtifactWriter {
    fn extension(&self) -> &'static str {
        "tiff"
    }

    fn write_artifact(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding TIFF artifact: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match self.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression);
        if self.horizontal_predictor {
            encoder = encoder.with_predictor(Predictor::Horizontal);
        }

        encoder
            .write_image::<RGB8>(image.width(), image.height(), image.as_raw())
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

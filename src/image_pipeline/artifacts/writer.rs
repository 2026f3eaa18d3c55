use std::io::Write;

use image::RgbImage;

use crate::image_pipeline::common::error::Result;

pub trait ArtifactWriter {
    fn extension(&self) -> &'static str;
    fn write_artifact(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()>;
}

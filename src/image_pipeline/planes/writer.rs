use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::grid::DecodedImage;

pub trait PlaneWriter {
    fn write_planes(&self, image: &DecodedImage, output: &mut dyn Write) -> Result<()>;
}

impl<T: PlaneWriter + ?Sized> PlaneWriter for Box<T> {
    fn write_planes(&self, image: &DecodedImage, output: &mut dyn Write) -> Result<()> {
        (**self).write_planes(image, output)
    }
}

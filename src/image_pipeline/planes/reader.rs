use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::grid::DecodedImage;

pub trait PlaneReader {
    fn read_planes(&self, data: &[u8]) -> Result<DecodedImage>;
}

impl<T: PlaneReader + ?Sized> PlaneReader for Box<T> {
    fn read_planes(&self, data: &[u8]) -> Result<DecodedImage> {
        (**self).read_planes(data)
    }
}

//! Plane reading and writing
//!
//! Readers turn text channel dumps, YUV 4:2:0 frames, or raster images into a
//! `DecodedImage`; writers serialize the planes back out.

mod export;
mod raster;
mod reader;
mod text_channel;
mod writer;
mod yuv420;


pub use export::{channel_dump_path, export_channels};
pub use raster::{RasterColor, RasterImageReader, rgb_to_ycbcr};
pub use reader::PlaneReader;
pub use text_channel::{TextChannelReader, TextChannelWriter};
pub use writer::PlaneWriter;
pub use yuv420::{Yuv420Reader, Yuv420Writer, yuv420_frame_len};

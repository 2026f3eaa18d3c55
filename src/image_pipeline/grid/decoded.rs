//! Decoded multi-plane images

use std::fmt;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::types::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Gray,
    R,
    G,
    B,
    Y,
    Cb,
    Cr,
}

impl Channel {
    /// Suffix used in exported channel file names (`_Y_channel.txt`, `_U_channel.txt`, ...).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Channel::Gray => "L",
            Channel::R => "R",
            Channel::G => "G",
            Channel::B => "B",
            Channel::Y => "Y",
            Channel::Cb => "U",
            Channel::Cr => "V",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Gray => "Gray",
            Channel::R => "R",
            Channel::G => "G",
            Channel::B => "B",
            Channel::Y => "Y",
            Channel::Cb => "Cb",
            Channel::Cr => "Cr",
        };
        f.write_str(name)
    }
}

/// How the planes of a [`DecodedImage`] relate to its nominal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneLayout {
    Single,
    Rgb,
    YCbCr,
    /// Full-resolution luma, chroma halved in both axes.
    Yuv420,
}

impl PlaneLayout {
    pub fn channels(self) -> &'static [Channel] {
        match self {
            PlaneLayout::Single => &[Channel::Gray],
            PlaneLayout::Rgb => &[Channel::R, Channel::G, Channel::B],
            PlaneLayout::YCbCr | PlaneLayout::Yuv420 => &[Channel::Y, Channel::Cb, Channel::Cr],
        }
    }

    /// Dimensions `(width, height)` of plane `index` for an image of the given size.
    pub fn plane_dimensions(self, index: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            PlaneLayout::Yuv420 if index > 0 => (width / 2, height / 2),
            _ => (width, height),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub channel: Channel,
    pub grid: Grid<u8>,
}

/// An image decoded into per-channel 8-bit grids, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    layout: PlaneLayout,
    planes: Vec<Plane>,
}

impl DecodedImage {
    /// Assembles an image, checking plane count and every plane's shape against `layout`.
    pub fn new(width: usize, height: usize, layout: PlaneLayout, grids: Vec<Grid<u8>>) -> Result<Self> {
        let channels = layout.channels();
        if grids.len() != channels.len() {
            return Err(PipelineError::dimension_mismatch(
                format!("{layout:?} plane count"),
                channels.len(),
                grids.len(),
            ));
        }

        let mut planes = Vec::with_capacity(grids.len());
        for (index, (grid, &channel)) in grids.into_iter().zip(channels).enumerate() {
            let (w, h) = layout.plane_dimensions(index, width, height);
            if grid.width() != w || grid.height() != h {
                return Err(PipelineError::dimension_mismatch(
                    format!("{channel} plane ({w}x{h} expected, {}x{} found)", grid.width(), grid.height()),
                    w * h,
                    grid.len(),
                ));
            }
            planes.push(Plane { channel, grid });
        }

        Ok(Self {
            width,
            height,
            layout,
            planes,
        })
    }

    /// A one-plane image carrying an arbitrary channel tag.
    pub fn single(channel: Channel, grid: Grid<u8>) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            layout: PlaneLayout::Single,
            planes: vec![Plane { channel, grid }],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> PlaneLayout {
        self.layout
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn plane(&self, channel: Channel) -> Option<&Grid<u8>> {
        self.planes.iter().find(|p| p.channel == channel).map(|p| &p.grid)
    }

    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }
}

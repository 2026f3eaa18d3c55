//! Decimal text channel dumps.
//!
//! One image row per line, samples separated by whitespace. Line breaks are
//! not significant when reading; only the total sample count is checked.

use std::io::{BufWriter, Write};

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::{Channel, DecodedImage, Grid, sample_count};
use crate::image_pipeline::planes::reader::PlaneReader;
use crate::image_pipeline::planes::writer::PlaneWriter;

#[derive(Debug, Clone, Copy)]
pub struct TextChannelReader {
    pub width: usize,
    pub height: usize,
    pub channel: Channel,
}

impl TextChannelReader {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            channel: Channel::Gray,
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }
}

impl PlaneReader for TextChannelReader {
    fn read_planes(&self, data: &[u8]) -> Result<DecodedImage> {
        let text = std::str::from_utf8(data)
            .map_err(|e| PipelineError::DecodeError(format!("channel dump is not UTF-8: {e}")))?;

        let expected = sample_count(self.width, self.height)?;
        // sized from the input, not the declared dimensions
        let mut samples = Vec::with_capacity(expected.min(data.len() / 2 + 1));
        for (line_no, line) in text.lines().enumerate() {
            for token in line.split_whitespace() {
                let value = token.parse::<u8>().map_err(|_| {
                    PipelineError::DecodeError(format!(
                        "line {}: '{}' is not a sample in 0..=255",
                        line_no + 1,
                        token
                    ))
                })?;
                samples.push(value);
            }
        }
        debug!(samples = samples.len(), "Parsed channel dump");

        if samples.len() != expected {
            return Err(PipelineError::dimension_mismatch(
                format!("{}x{} channel dump", self.width, self.height),
                expected,
                samples.len(),
            ));
        }

        let grid = Grid::from_vec(self.width, self.height, samples)?;
        Ok(DecodedImage::single(self.channel, grid))
    }
}

/// Writes the first plane of an image as a decimal text dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextChannelWriter;

impl TextChannelWriter {
    pub fn write_grid(&self, grid: &Grid<u8>, output: &mut dyn Write) -> Result<()> {
        let mut out = BufWriter::new(output);
        for row in grid.rows() {
            let mut first = true;
            for value in row {
                if !first {
                    out.write_all(b" ")?;
                }
                write!(out, "{value}")?;
                first = false;
            }
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl PlaneWriter for TextChannelWriter {
    fn write_planes(&self, image: &DecodedImage, output: &mut dyn Write) -> Result<()> {
        let plane = image
            .planes()
            .first()
            .ok_or_else(|| PipelineError::UnsupportedFormat("image has no planes".to_string()))?;
        self.write_grid(&plane.grid, output)
    }
}

//! File-level descriptions of pipeline inputs and outputs.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::DecodedImage;
use crate::image_pipeline::planes::{
    PlaneReader, PlaneWriter, RasterColor, RasterImageReader, TextChannelReader, TextChannelWriter,
    Yuv420Reader, Yuv420Writer,
};

/// How to decode an input file. Raw formats always carry their declared size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    Text { width: usize, height: usize },
    Yuv420 { width: usize, height: usize },
    Raster { color: RasterColor },
}

impl InputFormat {
    pub fn reader(&self) -> Box<dyn PlaneReader> {
        match *self {
            InputFormat::Text { width, height } => Box::new(TextChannelReader::new(width, height)),
            InputFormat::Yuv420 { width, height } => Box::new(Yuv420Reader::new(width, height)),
            InputFormat::Raster { color } => Box::new(RasterImageReader::new(color)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yuv420,
}

impl OutputFormat {
    pub fn writer(&self) -> Box<dyn PlaneWriter> {
        match self {
            OutputFormat::Text => Box::new(TextChannelWriter),
            OutputFormat::Yuv420 => Box::new(Yuv420Writer),
        }
    }
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| PipelineError::InputReadError(format!("{}: {}", path.display(), e)))
}

/// A decoded image and the name it is reported under.
#[derive(Debug, Clone)]
pub struct LabeledImage {
    pub label: String,
    pub image: DecodedImage,
}

impl LabeledImage {
    pub fn new(label: impl Into<String>, image: DecodedImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputSpec {
    pub label: String,
    pub path: PathBuf,
    pub format: InputFormat,
}

impl InputSpec {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, format: InputFormat) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            format,
        }
    }

    pub fn load(&self) -> Result<LabeledImage> {
        debug!(label = %self.label, path = %self.path.display(), "Loading input");
        let data = read_input(&self.path)?;
        let image = self.format.reader().read_planes(&data).map_err(|e| match e {
            PipelineError::DimensionMismatch {
                context,
                expected,
                actual,
            } => PipelineError::DimensionMismatch {
                context: format!("{}: {}", self.path.display(), context),
                expected,
                actual,
            },
            PipelineError::DecodeError(msg) => {
                PipelineError::DecodeError(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;
        Ok(LabeledImage::new(self.label.clone(), image))
    }
}

/// One reference-vs-candidate comparison, with the native-resolution original as baseline.
#[derive(Debug, Clone)]
pub struct ComparisonJob {
    pub original: InputSpec,
    pub reference: InputSpec,
    pub candidate: InputSpec,
}

use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::{PipelineError, Result, StageTimings},
    grid::{DecodedImage, Grid, PlaneLayout},
    pipelines::inputs::read_input,
    pipelines::types::ResizeConfig,
    planes::{PlaneReader, PlaneWriter, TextChannelReader, TextChannelWriter},
    resize::{BilinearResampler, DivergenceProbe, Resampler, TracingObserver},
};

pub struct ResizePipeline<R: PlaneReader, W: PlaneWriter, S: Resampler> {
    reader: R,
    writer: W,
    resampler: S,
    config: ResizeConfig,
    reference: Option<DecodedImage>,
}

impl ResizePipeline<TextChannelReader, TextChannelWriter, BilinearResampler> {
    /// Text dump in, bilinear resize, text dump out.
    pub fn new(source_width: usize, source_height: usize, config: ResizeConfig) -> Self {
        Self {
            reader: TextChannelReader::new(source_width, source_height),
            writer: TextChannelWriter,
            resampler: BilinearResampler,
            config,
            reference: None,
        }
    }
}

impl<R: PlaneReader, W: PlaneWriter, S: Resampler> ResizePipeline<R, W, S> {
    pub fn with_custom(reader: R, writer: W, resampler: S, config: ResizeConfig) -> Self {
        Self {
            reader,
            writer,
            resampler,
            config,
            reference: None,
        }
    }

    /// Reports samples diverging from `reference` (already at target size) while resizing.
    pub fn with_reference(mut self, reference: DecodedImage) -> Self {
        self.reference = Some(reference);
        self
    }

    fn validate_target(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Target dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn probe_plane(&self, index: usize, resized: &Grid<f64>, label: String) -> Result<()> {
        let Some(reference) = &self.reference else {
            return Ok(());
        };
        let plane = reference.planes().get(index).ok_or_else(|| {
            PipelineError::dimension_mismatch("divergence reference plane count", index + 1, reference.planes().len())
        })?;
        let mut observer = TracingObserver { label };
        let flagged = DivergenceProbe::new(self.config.divergence_threshold).scan(resized, &plane.grid, &mut observer)?;
        if flagged > 0 {
            warn!(plane = %plane.channel, flagged, "Resized plane diverges from reference");
        }
        Ok(())
    }

    /// Resizes every plane of `image` to the configured target, chroma of 4:2:0 at half size.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn resize_image(&self, image: &DecodedImage) -> Result<DecodedImage> {
        let (width, height) = self.config.target_for(image.width(), image.height());
        self.validate_target(width, height)?;
        let layout = image.layout();

        let mut grids = Vec::with_capacity(image.planes().len());
        for (index, plane) in image.planes().iter().enumerate() {
            let (w, h) = layout.plane_dimensions(index, width, height);
            let _span = tracing::info_span!("resize_plane", channel = %plane.channel, w, h).entered();
            // 4:2:0 chroma of a one-sample-wide or -tall target has no samples
            if w == 0 || h == 0 {
                grids.push(Grid::from_vec(w, h, Vec::new())?);
                continue;
            }
            let resized = self.resampler.resample(&plane.grid, h, w)?;
            self.probe_plane(index, &resized, plane.channel.to_string())?;
            grids.push(resized.quantize());
        }

        match layout {
            PlaneLayout::Single => {
                let channel = image.planes()[0].channel;
                let grid = grids.pop().ok_or_else(|| PipelineError::InvalidDimensions(0, 0))?;
                Ok(DecodedImage::single(channel, grid))
            }
            _ => DecodedImage::new(width, height, layout, grids),
        }
    }

    fn run(&self, input_data: &[u8], timings: &mut StageTimings) -> Result<(DecodedImage, Vec<u8>)> {
        let image = timings.measure("decode_planes", || {
            let _span = tracing::info_span!("decode_planes").entered();
            self.reader.read_planes(input_data)
        })?;

        let resized = timings.measure("resize", || self.resize_image(&image))?;

        let mut encoded = Vec::new();
        timings.measure("encode_planes", || {
            let _span = tracing::info_span!("encode_planes").entered();
            self.writer.write_planes(&resized, &mut encoded)
        })?;

        info!(
            src_width = image.width(),
            src_height = image.height(),
            width = resized.width(),
            height = resized.height(),
            "Resize complete"
        );
        Ok((resized, encoded))
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn resize(&self, input_data: &[u8], output: &mut dyn Write) -> Result<DecodedImage> {
        let (resized, encoded) = self.run(input_data, &mut StageTimings::new())?;
        output.write_all(&encoded)?;
        Ok(resized)
    }

    pub fn resize_with_timings(&self, input_data: &[u8], output: &mut dyn Write) -> Result<StageTimings> {
        let mut timings = StageTimings::new();
        let (_, encoded) = self.run(input_data, &mut timings)?;
        timings.measure("write_output", || output.write_all(&encoded))?;
        Ok(timings)
    }

    /// Resizes `input_path` into `output_path`. The output file is only created
    /// once decoding and resizing have succeeded.
    #[instrument(skip(self, input_path, output_path))]
    pub fn resize_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<StageTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Resizing file"
        );

        let mut timings = StageTimings::new();
        let input_data = timings.measure("read_input_file", || read_input(input_path))?;
        let (_, encoded) = self.run(&input_data, &mut timings)?;

        timings.measure("write_output_file", || {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded)
                .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e)))
        })?;

        Ok(timings)
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ResizeConfig) {
        self.config = config;
    }
}

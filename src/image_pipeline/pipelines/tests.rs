use std::io::Cursor;
use std::io::Write;
use std::sync::{Arc, Mutex};

use image::RgbImage;

use crate::image_pipeline::artifacts::{ArtifactWriter, TiffArtifactWriter};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::{Channel, DecodedImage, Grid, PlaneLayout};
use crate::image_pipeline::pipelines::{
    ComparisonConfig, ComparisonJob, ComparisonPipeline, InputFormat, InputSpec, LabeledImage, ResizeConfig,
    ResizePipeline,
};
use crate::image_pipeline::planes::{
    PlaneReader, PlaneWriter, TextChannelWriter, Yuv420Reader, Yuv420Writer, yuv420_frame_len,
};
use crate::image_pipeline::resize::BilinearResampler;

struct MockReader {
    should_fail: bool,
    mock_image: Option<DecodedImage>,
}

impl PlaneReader for MockReader {
    fn read_planes(&self, _data: &[u8]) -> Result<DecodedImage> {
        if self.should_fail {
            return Err(PipelineError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_image.clone().unwrap_or_else(|| {
            DecodedImage::single(Channel::Y, Grid::from_fn(8, 8, |r, c| (r * 8 + c) as u8))
        }))
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<DecodedImage>>>,
}

impl PlaneWriter for MockWriter {
    fn write_planes(&self, image: &DecodedImage, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
struct CountingArtifactWriter {
    count: Arc<Mutex<usize>>,
}

impl ArtifactWriter for CountingArtifactWriter {
    fn extension(&self) -> &'static str {
        "raw"
    }

    fn write_artifact(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()> {
        *self.count.lock().unwrap() += 1;
        output.write_all(image.as_raw())?;
        Ok(())
    }
}

fn mock_pipeline(
    reader_fails: bool,
    writer_fails: bool,
    config: ResizeConfig,
) -> (ResizePipeline<MockReader, MockWriter, BilinearResampler>, Arc<Mutex<Vec<DecodedImage>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let pipeline = ResizePipeline::with_custom(
        MockReader { should_fail: reader_fails, mock_image: None },
        MockWriter { should_fail: writer_fails, written: written.clone() },
        BilinearResampler,
        config,
    );
    (pipeline, written)
}

fn text_dump(grid: &Grid<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    TextChannelWriter.write_grid(grid, &mut out).unwrap();
    out
}

#[test]
fn test_config_builders() {
    let resize = ResizeConfig::builder()
        .target(960, 540)
        .divergence_threshold(12.0)
        .max_dimension(None)
        .build();
    assert_eq!(resize.target, Some((960, 540)));
    assert_eq!(resize.divergence_threshold, 12.0);
    assert_eq!(resize.max_dimension, None);

    let compare = ComparisonConfig::builder()
        .thresholds(vec![2.0])
        .histogram_bins(40)
        .write_artifacts(false)
        .build();
    assert_eq!(compare.thresholds, vec![2.0]);
    assert_eq!(compare.histogram_bins, 40);
    assert_eq!(compare.histogram_range, (-10.0, 10.0));
    assert!(!compare.write_artifacts);
}

#[test]
fn test_successful_resize_keeps_channel() {
    let config = ResizeConfig::builder().target(4, 2).build();
    let (pipeline, written) = mock_pipeline(false, false, config);

    let resized = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new())).unwrap();

    assert_eq!((resized.width(), resized.height()), (4, 2));
    assert_eq!(resized.planes()[0].channel, Channel::Y);
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_default_config_keeps_source_size() {
    let (pipeline, written) = mock_pipeline(false, false, ResizeConfig::default());

    let resized = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new())).unwrap();

    assert_eq!((resized.width(), resized.height()), (8, 8));
    assert_eq!(written.lock().unwrap()[0].planes()[0].grid.get(7, 7), 63);
}

#[test]
fn test_reader_failure() {
    let (pipeline, written) = mock_pipeline(true, false, ResizeConfig::default());

    let result = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let config = ResizeConfig::builder().target(2, 2).build();
    let (pipeline, _) = mock_pipeline(false, true, config);

    let result = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), PipelineError::EncodeError(_)));
}

#[test]
fn test_target_over_maximum_is_rejected() {
    let config = ResizeConfig::builder().target(6000, 10).max_dimension(Some(5000)).build();
    let (pipeline, _) = mock_pipeline(false, false, config);

    let result = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), PipelineError::InvalidDimensions(6000, 10)));
}

#[test]
fn test_timings_cover_every_stage() {
    let config = ResizeConfig::builder().target(3, 3).build();
    let (pipeline, _) = mock_pipeline(false, false, config);

    let timings = pipeline.resize_with_timings(b"ignored", &mut Cursor::new(Vec::new())).unwrap();

    for stage in ["decode_planes", "resize", "encode_planes", "write_output"] {
        assert!(timings.stage(stage).is_some(), "missing {stage}");
    }
}

#[test]
fn test_yuv_resize_halves_chroma() {
    let frame: Vec<u8> = (0..24).map(|v| v * 10).collect();
    let pipeline = ResizePipeline::with_custom(
        Yuv420Reader::new(4, 4),
        Yuv420Writer,
        BilinearResampler,
        ResizeConfig::builder().target(2, 2).build(),
    );
    let mut out = Vec::new();

    let resized = pipeline.resize(&frame, &mut out).unwrap();

    assert_eq!(resized.layout(), PlaneLayout::Yuv420);
    assert_eq!(resized.plane(Channel::Y).unwrap().as_slice(), &[0, 30, 120, 150]);
    assert_eq!(resized.plane(Channel::Cb).unwrap().as_slice(), &[160]);
    assert_eq!(resized.plane(Channel::Cr).unwrap().as_slice(), &[200]);
    assert_eq!(out.len(), 6);
}

#[test]
fn test_yuv_resize_to_single_column_drops_chroma() {
    let frame: Vec<u8> = (0..yuv420_frame_len(4, 4) as u8).collect();
    let pipeline = ResizePipeline::with_custom(
        Yuv420Reader::new(4, 4),
        Yuv420Writer,
        BilinearResampler,
        ResizeConfig::builder().target(1, 4).build(),
    );
    let mut out = Vec::new();

    let resized = pipeline.resize(&frame, &mut out).unwrap();

    assert_eq!(resized.plane(Channel::Y).unwrap().as_slice(), &[0, 4, 8, 12]);
    let cb = resized.plane(Channel::Cb).unwrap();
    assert_eq!((cb.width(), cb.height()), (0, 2));
    assert_eq!(out.len(), yuv420_frame_len(1, 4));
}

#[test]
fn test_reference_with_wrong_shape_fails() {
    let config = ResizeConfig::builder().target(4, 4).build();
    let (pipeline, _) = mock_pipeline(false, false, config);
    let reference = DecodedImage::single(Channel::Y, Grid::from_fn(3, 3, |_, _| 0u8));
    let pipeline = pipeline.with_reference(reference);

    let result = pipeline.resize(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), PipelineError::DimensionMismatch { .. }));
}

#[test]
fn test_resize_file_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("frame_Y_channel.txt");
    let output = dir.path().join("resized_Y.txt");
    std::fs::write(&input, "1 2 3\n4 5 6\n").unwrap();

    let pipeline = ResizePipeline::new(4, 4, ResizeConfig::builder().target(2, 2).build());
    let err = pipeline.resize_file(&input, &output).unwrap_err();

    assert!(matches!(err, PipelineError::DimensionMismatch { expected: 16, actual: 6, .. }));
    assert!(!output.exists());
}

#[test]
fn test_resize_file_writes_text_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, "0 100\n100 200\n").unwrap();

    let pipeline = ResizePipeline::new(2, 2, ResizeConfig::builder().target(3, 3).build());
    pipeline.resize_file(&input, &output).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "0 50 100\n50 100 150\n100 150 200\n");
}

fn labeled(label: &str, width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> LabeledImage {
    LabeledImage::new(label, DecodedImage::single(Channel::Y, Grid::from_fn(width, height, f)))
}

#[test]
fn test_compare_identical_images() {
    let config = ComparisonConfig::builder().write_artifacts(false).build();
    let pipeline = ComparisonPipeline::new(config);
    let original = labeled("Original", 8, 8, |_, _| 128);
    let reference = labeled("FFmpeg", 4, 4, |_, _| 128);
    let candidate = labeled("Custom Bilinear", 4, 4, |_, _| 128);

    let report = pipeline.compare(&original, &reference, &candidate).unwrap();

    assert_eq!(report.summaries.len(), 3);
    assert!(report.summaries.iter().all(|s| s.planes[0].summary.psnr == f64::INFINITY));
    let comparison = &report.comparisons[0].comparison;
    assert_eq!(comparison.mean_abs, 0.0);
    assert_eq!(comparison.max_abs, 0.0);
    assert!(comparison.exceeding.iter().all(|s| s.percent == 0.0));
    assert!(report.artifacts.is_empty());
    assert!(report.to_string().contains("Comparison between FFmpeg and Custom Bilinear"));
}

#[test]
fn test_compare_shape_mismatch_writes_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let writer = CountingArtifactWriter::default();
    let config = ComparisonConfig::builder().output_dir(dir.path()).build();
    let pipeline = ComparisonPipeline::with_writer(writer.clone(), config);
    let original = labeled("Original", 8, 8, |_, _| 0);
    let reference = labeled("FFmpeg", 4, 4, |_, _| 0);
    let candidate = labeled("Custom", 4, 3, |_, _| 0);

    let err = pipeline.compare(&original, &reference, &candidate).unwrap_err();

    assert!(matches!(err, PipelineError::DimensionMismatch { .. }));
    assert_eq!(*writer.count.lock().unwrap(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_compare_yuv_writes_per_channel_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = ComparisonConfig::builder().output_dir(dir.path()).build();
    let pipeline = ComparisonPipeline::with_writer(TiffArtifactWriter::default(), config);

    let frame = |w: usize, h: usize, offset: u8| {
        let luma = Grid::from_fn(w, h, |r, c| (r * w + c) as u8 + offset);
        let chroma = Grid::from_fn(w / 2, h / 2, |_, _| 128 + offset);
        DecodedImage::new(w, h, PlaneLayout::Yuv420, vec![luma, chroma.clone(), chroma]).unwrap()
    };
    let original = LabeledImage::new("Original", frame(8, 8, 0));
    let reference = LabeledImage::new("FFmpeg", frame(4, 4, 0));
    let candidate = LabeledImage::new("Custom Bilinear", frame(4, 4, 2));

    let report = pipeline.compare(&original, &reference, &candidate).unwrap();

    assert_eq!(report.comparisons.len(), 3);
    assert!(report.comparisons.iter().all(|p| p.comparison.mean_abs == 2.0));
    assert_eq!(report.artifacts.len(), 6);
    assert!(dir.path().join("difference_heatmap_cr_ffmpeg_custom_bilinear.tiff").exists());
    assert!(dir.path().join("difference_histogram_y_ffmpeg_custom_bilinear.tiff").exists());
}

#[test]
fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let path = |name: &str| dir.path().join(name);
    let grid = |w: usize, h: usize| Grid::from_fn(w, h, |r, c| ((r + c) * 9) as u8);
    std::fs::write(path("orig.txt"), text_dump(&grid(8, 8))).unwrap();
    std::fs::write(path("ref.txt"), text_dump(&grid(4, 4))).unwrap();
    std::fs::write(path("cand.txt"), text_dump(&grid(4, 4))).unwrap();
    std::fs::write(path("short.txt"), "1 2 3\n").unwrap();

    let spec = |label: &str, name: &str, w: usize, h: usize| {
        InputSpec::new(label, path(name), InputFormat::Text { width: w, height: h })
    };
    let good = ComparisonJob {
        original: spec("Original", "orig.txt", 8, 8),
        reference: spec("FFmpeg", "ref.txt", 4, 4),
        candidate: spec("Custom", "cand.txt", 4, 4),
    };
    let bad = ComparisonJob {
        candidate: spec("Custom", "short.txt", 4, 4),
        ..good.clone()
    };
    let missing = ComparisonJob {
        reference: spec("FFmpeg", "does_not_exist.txt", 4, 4),
        ..good.clone()
    };

    let pipeline = ComparisonPipeline::new(ComparisonConfig::builder().write_artifacts(false).build());
    let results = pipeline.run_batch(&[bad, good, missing]);

    assert_eq!(results.len(), 3);
    assert!(matches!(results[0], Err(PipelineError::DimensionMismatch { .. })));
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(PipelineError::InputReadError(_))));
}

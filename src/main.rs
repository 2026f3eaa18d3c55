use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use resample_bench::image_pipeline::compare::mean;
use resample_bench::image_pipeline::{
    ArtifactFormat, ArtifactWriter, BilinearResampler, ComparisonConfig, ComparisonJob,
    ComparisonPipeline, Grid, InputFormat, InputSpec, OutputFormat, PlaneReader, PlaneWriter,
    PngArtifactWriter, RasterColor, RasterImageReader, ResizeConfig, ResizePipeline, StageTimings,
    TiffArtifactWriter, TiffCompression, export_channels,
};
use resample_bench::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "resample-bench",
    version,
    about = "Bilinear resizing and resize quality comparison"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize a channel dump, YUV 4:2:0 frame, or raster image with bilinear interpolation.
    Resize(ResizeArgs),
    /// Compare one or more candidate resizes against a reference resize.
    Compare(CompareArgs),
    /// Write every channel of a raster image as a decimal text dump.
    ExportChannels(ExportArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputKind {
    Text,
    Yuv420,
    Raster,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RawKind {
    Text,
    Yuv420,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorArg {
    Rgb,
    Ycbcr,
}

impl From<ColorArg> for RasterColor {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Rgb => RasterColor::Rgb,
            ColorArg::Ycbcr => RasterColor::YCbCr,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArtifactArg {
    Png,
    Tiff,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(c: CompressionArg) -> Self {
        match c {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(Args, Debug)]
struct ResizeArgs {
    /// Input file.
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = InputKind::Text)]
    format: InputKind,

    /// Source width (required for text and yuv420 inputs).
    #[arg(long)]
    width: Option<usize>,

    /// Source height (required for text and yuv420 inputs).
    #[arg(long)]
    height: Option<usize>,

    /// Colour planes to decode raster inputs into.
    #[arg(long, value_enum, default_value_t = ColorArg::Rgb)]
    color: ColorArg,

    #[arg(long)]
    out_width: usize,

    #[arg(long)]
    out_height: usize,

    /// Output file. For multi-plane text output this is the stem of the per-channel dumps.
    #[arg(long)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = RawKind::Text)]
    output_format: RawKind,

    /// Reference resize at the target size (same format as the input) to report
    /// divergent samples against.
    #[arg(long)]
    reference: Option<PathBuf>,

    #[arg(long, default_value_t = 30.0)]
    divergence_threshold: f64,

    /// Print per-stage timings.
    #[arg(long)]
    timings: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Native-resolution original, used as the PSNR baseline after subsampling.
    #[arg(long)]
    original: PathBuf,

    /// Reference resize (for example produced by ffmpeg).
    #[arg(long)]
    reference: PathBuf,

    /// Candidate resize; repeat to compare several candidates in one run.
    #[arg(long, required = true)]
    candidate: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = RawKind::Text)]
    format: RawKind,

    #[arg(long)]
    original_width: usize,

    #[arg(long)]
    original_height: usize,

    /// Width of the reference and candidate resizes.
    #[arg(long)]
    width: usize,

    /// Height of the reference and candidate resizes.
    #[arg(long)]
    height: usize,

    #[arg(long, default_value = "Original Image")]
    original_label: String,

    #[arg(long, default_value = "FFmpeg")]
    reference_label: String,

    /// Label per candidate, in order; missing labels default to "Custom Bilinear".
    #[arg(long)]
    candidate_label: Vec<String>,

    /// Directory for histogram and heat map artifacts.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = ArtifactArg::Png)]
    artifact_format: ArtifactArg,

    #[arg(long, value_enum, default_value_t = CompressionArg::DeflateBalanced)]
    tiff_compression: CompressionArg,

    /// Only print statistics.
    #[arg(long)]
    no_artifacts: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Raster image (PNG, JPEG, ...).
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = ColorArg::Rgb)]
    color: ColorArg,

    /// Stem of the written dumps; defaults to the input path without extension.
    #[arg(long)]
    stem: Option<PathBuf>,
}

fn raw_dimensions(width: Option<usize>, height: Option<usize>) -> anyhow::Result<(usize, usize)> {
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => bail!("--width and --height are required for raw inputs"),
    }
}

fn input_format(
    kind: InputKind,
    color: ColorArg,
    width: Option<usize>,
    height: Option<usize>,
) -> anyhow::Result<InputFormat> {
    Ok(match kind {
        InputKind::Text => {
            let (width, height) = raw_dimensions(width, height)?;
            InputFormat::Text { width, height }
        }
        InputKind::Yuv420 => {
            let (width, height) = raw_dimensions(width, height)?;
            InputFormat::Yuv420 { width, height }
        }
        InputKind::Raster => InputFormat::Raster { color: color.into() },
    })
}

fn stem_of(path: &Path) -> PathBuf {
    path.with_extension("")
}

type CliResizePipeline =
    ResizePipeline<Box<dyn PlaneReader>, Box<dyn PlaneWriter>, BilinearResampler>;

/// Multi-plane raster input written as text: one dump per channel next to `stem`.
fn resize_to_channel_dumps(
    pipeline: &CliResizePipeline,
    format: InputFormat,
    input: &Path,
    stem: &Path,
) -> anyhow::Result<(StageTimings, Vec<PathBuf>)> {
    let mut timings = StageTimings::new();
    let data = timings
        .measure("read_input_file", || std::fs::read(input))
        .with_context(|| format!("reading {}", input.display()))?;
    let image = timings.measure("decode_planes", || format.reader().read_planes(&data))?;
    let resized = timings.measure("resize", || pipeline.resize_image(&image))?;
    let paths = timings.measure("write_output_file", || export_channels(&resized, stem))?;
    Ok((timings, paths))
}

fn run_resize(args: ResizeArgs) -> anyhow::Result<()> {
    let config = ResizeConfig::builder()
        .target(args.out_width, args.out_height)
        .divergence_threshold(args.divergence_threshold)
        .build();
    let format = input_format(args.format, args.color, args.width, args.height)?;
    let output_format = match args.output_format {
        RawKind::Text => OutputFormat::Text,
        RawKind::Yuv420 => OutputFormat::Yuv420,
    };

    let mut pipeline = ResizePipeline::with_custom(
        format.reader(),
        output_format.writer(),
        BilinearResampler,
        config,
    );

    if let Some(reference) = &args.reference {
        let reference_format = input_format(
            args.format,
            args.color,
            Some(args.out_width),
            Some(args.out_height),
        )?;
        let loaded = InputSpec::new("reference", reference, reference_format)
            .load()
            .with_context(|| format!("loading reference {}", reference.display()))?;
        pipeline = pipeline.with_reference(loaded.image);
    }

    let per_channel_dumps =
        matches!(format, InputFormat::Raster { .. }) && output_format == OutputFormat::Text;
    let timings = if per_channel_dumps {
        let (timings, paths) =
            resize_to_channel_dumps(&pipeline, format, &args.input, &stem_of(&args.output))?;
        for path in paths {
            println!("Resized channel written to {}", path.display());
        }
        timings
    } else {
        let timings = pipeline
            .resize_file(&args.input, &args.output)
            .with_context(|| format!("resizing {}", args.input.display()))?;
        println!("Resized image written to {}", args.output.display());
        timings
    };

    if args.timings {
        println!("{timings}");
    }
    Ok(())
}

fn compare_with<A: ArtifactWriter>(
    pipeline: ComparisonPipeline<A>,
    jobs: &[ComparisonJob],
) -> anyhow::Result<()> {
    let results = pipeline.run_batch(jobs);
    let mut failed = 0;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(report) => println!("{report}"),
            Err(e) => {
                failed += 1;
                println!("Comparison of {} failed: {}\n", job.candidate.path.display(), e);
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} comparisons failed", jobs.len());
    }
    Ok(())
}

fn run_compare(args: CompareArgs) -> anyhow::Result<()> {
    let (native, resized) = match args.format {
        RawKind::Text => (
            InputFormat::Text {
                width: args.original_width,
                height: args.original_height,
            },
            InputFormat::Text {
                width: args.width,
                height: args.height,
            },
        ),
        RawKind::Yuv420 => (
            InputFormat::Yuv420 {
                width: args.original_width,
                height: args.original_height,
            },
            InputFormat::Yuv420 {
                width: args.width,
                height: args.height,
            },
        ),
    };

    let jobs: Vec<ComparisonJob> = args
        .candidate
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let label = args
                .candidate_label
                .get(i)
                .cloned()
                .unwrap_or_else(|| "Custom Bilinear".to_string());
            ComparisonJob {
                original: InputSpec::new(&args.original_label, &args.original, native),
                reference: InputSpec::new(&args.reference_label, &args.reference, resized),
                candidate: InputSpec::new(label, path, resized),
            }
        })
        .collect();

    let config = ComparisonConfig::builder()
        .output_dir(&args.out_dir)
        .write_artifacts(!args.no_artifacts)
        .build();

    let artifact_format = match args.artifact_format {
        ArtifactArg::Png => ArtifactFormat::Png,
        ArtifactArg::Tiff => ArtifactFormat::Tiff,
    };
    match artifact_format {
        ArtifactFormat::Png => {
            compare_with(ComparisonPipeline::with_writer(PngArtifactWriter, config), &jobs)
        }
        ArtifactFormat::Tiff => {
            let writer = TiffArtifactWriter {
                compression: args.tiff_compression.into(),
                horizontal_predictor: false,
            };
            compare_with(ComparisonPipeline::with_writer(writer, config), &jobs)
        }
    }
}

fn channel_stats(grid: &Grid<u8>) -> (u8, u8, f64) {
    let samples = grid.as_slice();
    let (min, max) = samples
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let values: Vec<f64> = samples.iter().map(|&v| f64::from(v)).collect();
    (min, max, mean(&values))
}

fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let image = RasterImageReader::new(args.color.into())
        .read_planes(&data)
        .with_context(|| format!("decoding {}", args.input.display()))?;
    let stem = args.stem.unwrap_or_else(|| stem_of(&args.input));

    for path in export_channels(&image, &stem)? {
        println!("Channel written to {}", path.display());
    }
    for plane in image.planes() {
        let (min, max, avg) = channel_stats(&plane.grid);
        println!(
            "{} channel - Min: {}, Max: {}, Mean: {:.2}",
            plane.channel, min, max, avg
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    info!("Starting resample-bench");

    match cli.cmd {
        Command::Resize(args) => run_resize(args),
        Command::Compare(args) => run_compare(args),
        Command::ExportChannels(args) => run_export(args),
    }
}

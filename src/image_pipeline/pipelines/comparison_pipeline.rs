use std::path::PathBuf;

use image::RgbImage;
use tracing::{error, info, instrument};

use crate::image_pipeline::{
    artifacts::{ArtifactKind, ArtifactWriter, PngArtifactWriter, artifact_path, render_heatmap, render_histogram},
    common::{PipelineError, Result},
    compare::{
        ComparisonReport, DifferenceHistogram, DifferenceMap, GridSummary, ImageSummary, PairwiseComparison,
        PlaneComparison, PlaneSummary, subsample_baseline,
    },
    grid::{Channel, DecodedImage, Grid},
    pipelines::inputs::{ComparisonJob, LabeledImage},
    pipelines::types::ComparisonConfig,
};

/// An artifact rendered in memory, not yet written.
struct PendingArtifact {
    path: PathBuf,
    image: RgbImage,
}

pub struct ComparisonPipeline<A: ArtifactWriter> {
    writer: A,
    config: ComparisonConfig,
}

impl ComparisonPipeline<PngArtifactWriter> {
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            writer: PngArtifactWriter,
            config,
        }
    }
}

fn ensure_matching_planes(a: &LabeledImage, b: &LabeledImage) -> Result<()> {
    let (pa, pb) = (a.image.planes(), b.image.planes());
    if pa.len() != pb.len() {
        return Err(PipelineError::dimension_mismatch(
            format!("plane count of '{}' vs '{}'", a.label, b.label),
            pa.len(),
            pb.len(),
        ));
    }
    for (x, y) in pa.iter().zip(pb) {
        if !x.grid.same_shape(&y.grid) {
            return Err(PipelineError::dimension_mismatch(
                format!(
                    "{} plane of '{}' ({}x{}) vs '{}' ({}x{})",
                    x.channel,
                    a.label,
                    x.grid.width(),
                    x.grid.height(),
                    b.label,
                    y.grid.width(),
                    y.grid.height()
                ),
                x.grid.len(),
                y.grid.len(),
            ));
        }
    }
    Ok(())
}

fn summarize<'a>(
    label: &str,
    planes: impl Iterator<Item = (Channel, &'a Grid<u8>)>,
    baselines: &[Grid<u8>],
) -> Result<ImageSummary> {
    let planes = planes
        .zip(baselines)
        .map(|((channel, grid), baseline)| {
            Ok(PlaneSummary {
                channel,
                summary: GridSummary::of(grid, baseline)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ImageSummary {
        label: label.to_string(),
        planes,
    })
}

fn planes_of(image: &DecodedImage) -> impl Iterator<Item = (Channel, &Grid<u8>)> {
    image.planes().iter().map(|p| (p.channel, &p.grid))
}

impl<A: ArtifactWriter> ComparisonPipeline<A> {
    pub fn with_writer(writer: A, config: ComparisonConfig) -> Self {
        Self { writer, config }
    }

    /// Subsamples every plane of `original` down to the matching plane of `target`.
    fn baselines(&self, original: &LabeledImage, target: &LabeledImage) -> Result<Vec<Grid<u8>>> {
        let (po, pt) = (original.image.planes(), target.image.planes());
        if po.len() != pt.len() {
            return Err(PipelineError::dimension_mismatch(
                format!("plane count of original '{}'", original.label),
                pt.len(),
                po.len(),
            ));
        }
        po.iter()
            .zip(pt)
            .map(|(o, t)| subsample_baseline(&o.grid, t.grid.width(), t.grid.height()))
            .collect()
    }

    fn render_artifacts(
        &self,
        channel: Option<Channel>,
        reference_label: &str,
        candidate_label: &str,
        map: &DifferenceMap,
    ) -> Vec<PendingArtifact> {
        let histogram = DifferenceHistogram::from_map(map, self.config.histogram_bins, self.config.histogram_range);
        let dir = &self.config.output_dir;
        let ext = self.writer.extension();
        vec![
            PendingArtifact {
                path: artifact_path(dir, ArtifactKind::Histogram, channel, reference_label, candidate_label, ext),
                image: render_histogram(&histogram),
            },
            PendingArtifact {
                path: artifact_path(dir, ArtifactKind::Heatmap, channel, reference_label, candidate_label, ext),
                image: render_heatmap(map),
            },
        ]
    }

    fn persist(&self, artifacts: Vec<PendingArtifact>) -> Result<Vec<PathBuf>> {
        if artifacts.is_empty() {
            return Ok(Vec::new());
        }
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", dir.display(), e)))?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let mut encoded = Vec::new();
            self.writer.write_artifact(&artifact.image, &mut encoded)?;
            std::fs::write(&artifact.path, &encoded)
                .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", artifact.path.display(), e)))?;
            info!(path = %artifact.path.display(), "Artifact saved");
            written.push(artifact.path);
        }
        Ok(written)
    }

    /// Compares `candidate` against `reference` plane by plane, summarising all three
    /// inputs against the subsampled original. Nothing is written unless every
    /// statistic could be computed.
    #[instrument(skip_all, fields(reference = %reference.label, candidate = %candidate.label))]
    pub fn compare(
        &self,
        original: &LabeledImage,
        reference: &LabeledImage,
        candidate: &LabeledImage,
    ) -> Result<ComparisonReport> {
        ensure_matching_planes(reference, candidate)?;
        let baselines = self.baselines(original, reference)?;

        let baseline_label = format!("{} (subsampled)", original.label);
        let summaries = {
            let _span = tracing::info_span!("summaries").entered();
            let baseline_planes = original
                .image
                .planes()
                .iter()
                .zip(&baselines)
                .map(|(plane, grid)| (plane.channel, grid));
            vec![
                summarize(&baseline_label, baseline_planes, &baselines)?,
                summarize(&reference.label, planes_of(&reference.image), &baselines)?,
                summarize(&candidate.label, planes_of(&candidate.image), &baselines)?,
            ]
        };

        let multi_plane = reference.image.planes().len() > 1;
        let mut comparisons = Vec::new();
        let mut pending = Vec::new();
        for (r, c) in reference.image.planes().iter().zip(candidate.image.planes()) {
            let _span = tracing::info_span!("compare_plane", channel = %r.channel).entered();
            let map = DifferenceMap::between(&r.grid, &c.grid)?;
            comparisons.push(PlaneComparison {
                channel: r.channel,
                comparison: PairwiseComparison::from_map(&map, &self.config.thresholds),
            });
            if self.config.write_artifacts {
                let channel = multi_plane.then_some(r.channel);
                pending.extend(self.render_artifacts(channel, &reference.label, &candidate.label, &map));
            }
        }

        let artifacts = self.persist(pending)?;

        info!(planes = comparisons.len(), artifacts = artifacts.len(), "Comparison complete");
        Ok(ComparisonReport {
            reference_label: reference.label.clone(),
            candidate_label: candidate.label.clone(),
            summaries,
            comparisons,
            artifacts,
        })
    }

    pub fn compare_files(&self, job: &ComparisonJob) -> Result<ComparisonReport> {
        let original = job.original.load()?;
        let reference = job.reference.load()?;
        let candidate = job.candidate.load()?;
        self.compare(&original, &reference, &candidate)
    }

    /// Runs every job; a failing job is logged and does not stop the others.
    pub fn run_batch(&self, jobs: &[ComparisonJob]) -> Vec<Result<ComparisonReport>> {
        jobs.iter()
            .enumerate()
            .map(|(index, job)| {
                let _span = tracing::info_span!("comparison_job", index).entered();
                let result = self.compare_files(job);
                if let Err(e) = &result {
                    error!(
                        reference = %job.reference.path.display(),
                        candidate = %job.candidate.path.display(),
                        "Comparison failed: {}",
                        e
                    );
                }
                result
            })
            .collect()
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ComparisonConfig) {
        self.config = config;
    }
}

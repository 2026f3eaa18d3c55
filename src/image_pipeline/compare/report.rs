//! Console rendering of comparison results.

use std::fmt;
use std::path::PathBuf;

use crate::image_pipeline::compare::stats::{GridSummary, PairwiseComparison};
use crate::image_pipeline::grid::Channel;

#[derive(Debug, Clone)]
pub struct PlaneSummary {
    pub channel: Channel,
    pub summary: GridSummary,
}

/// Per-plane summaries of one labelled image against the baseline.
#[derive(Debug, Clone)]
pub struct ImageSummary {
    pub label: String,
    pub planes: Vec<PlaneSummary>,
}

#[derive(Debug, Clone)]
pub struct PlaneComparison {
    pub channel: Channel,
    pub comparison: PairwiseComparison,
}

#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub reference_label: String,
    pub candidate_label: String,
    pub summaries: Vec<ImageSummary>,
    pub comparisons: Vec<PlaneComparison>,
    pub artifacts: Vec<PathBuf>,
}

fn fmt_psnr(psnr: f64) -> String {
    if psnr.is_infinite() {
        "inf dB".to_string()
    } else {
        format!("{psnr:.2} dB")
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.height, self.width)?;
        writeln!(f, "Min value: {}", self.min)?;
        writeln!(f, "Max value: {}", self.max)?;
        writeln!(f, "Mean value: {:.2}", self.mean)?;
        writeln!(f, "Median value: {}", self.median)?;
        writeln!(f, "Standard deviation: {:.2}", self.std_dev)?;
        write!(f, "PSNR (wrt original): {}", fmt_psnr(self.psnr))
    }
}

impl fmt::Display for PairwiseComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean absolute difference: {:.4}", self.mean_abs)?;
        writeln!(f, "Median absolute difference: {:.4}", self.median_abs)?;
        writeln!(f, "Max absolute difference: {:.4}", self.max_abs)?;
        write!(f, "Standard deviation of difference: {:.4}", self.std_signed)?;
        for share in &self.exceeding {
            write!(
                f,
                "\nPercentage of pixels with difference > {}: {:.2}%",
                share.threshold, share.percent
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for image in &self.summaries {
            writeln!(f, "Summary for {}:", image.label)?;
            let labelled = image.planes.len() > 1;
            for plane in &image.planes {
                if labelled {
                    writeln!(f, "[{}]", plane.channel)?;
                }
                writeln!(f, "{}", plane.summary)?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "Comparison between {} and {}:",
            self.reference_label, self.candidate_label
        )?;
        let labelled = self.comparisons.len() > 1;
        for plane in &self.comparisons {
            if labelled {
                writeln!(f, "[{}]", plane.channel)?;
            }
            writeln!(f, "{}", plane.comparison)?;
        }

        for artifact in &self.artifacts {
            writeln!(f, "Saved {}", artifact.display())?;
        }
        Ok(())
    }
}

//! Reporting of resized samples that stray far from a reference resize.

use tracing::warn;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::Grid;

pub const DEFAULT_DIVERGENCE_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    pub row: usize,
    pub col: usize,
    pub resized: f64,
    pub reference: f64,
}

impl Divergence {
    pub fn delta(&self) -> f64 {
        self.resized - self.reference
    }
}

pub trait DivergenceObserver {
    fn on_divergence(&mut self, divergence: Divergence);
}

/// Logs every divergence at `warn` level.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pub label: String,
}

impl DivergenceObserver for TracingObserver {
    fn on_divergence(&mut self, d: Divergence) {
        warn!(
            plane = %self.label,
            row = d.row,
            col = d.col,
            resized = d.resized,
            reference = d.reference,
            delta = d.delta(),
            "Resized sample diverges from reference"
        );
    }
}

#[derive(Debug, Default)]
pub struct CollectingObserver {
    pub events: Vec<Divergence>,
}

impl DivergenceObserver for CollectingObserver {
    fn on_divergence(&mut self, divergence: Divergence) {
        self.events.push(divergence);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DivergenceProbe {
    pub threshold: f64,
}

impl Default for DivergenceProbe {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DIVERGENCE_THRESHOLD,
        }
    }
}

impl DivergenceProbe {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Reports every position where `|resized - reference|` exceeds the threshold,
    /// in row-major order. Returns the number of reported positions.
    pub fn scan<R>(
        &self,
        resized: &Grid<f64>,
        reference: &Grid<R>,
        observer: &mut dyn DivergenceObserver,
    ) -> Result<usize>
    where
        R: Copy + Into<f64>,
    {
        if !resized.same_shape(reference) {
            return Err(PipelineError::dimension_mismatch(
                format!(
                    "divergence reference ({}x{} resized, {}x{} reference)",
                    resized.width(),
                    resized.height(),
                    reference.width(),
                    reference.height()
                ),
                resized.len(),
                reference.len(),
            ));
        }

        let mut count = 0;
        let width = resized.width();
        for (index, (&value, &expected)) in resized.as_slice().iter().zip(reference.as_slice()).enumerate() {
            let expected: f64 = expected.into();
            if (value - expected).abs() > self.threshold {
                observer.on_divergence(Divergence {
                    row: index / width,
                    col: index % width,
                    resized: value,
                    reference: expected,
                });
                count += 1;
            }
        }
        Ok(count)
    }
}

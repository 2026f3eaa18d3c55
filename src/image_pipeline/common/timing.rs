//! Wall-clock timing of pipeline stages.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: &'static str,
    pub duration: Duration,
}

/// Ordered stage durations of one pipeline run.
#[derive(Debug, Default, Clone)]
pub struct StageTimings {
    stages: Vec<StageTiming>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f`, recording how long it took under `stage`.
    pub fn measure<T>(&mut self, stage: &'static str, f: impl FnOnce() -> T) -> T {
        let stopwatch = Stopwatch::start(stage);
        let value = f();
        self.record(stopwatch.stop());
        value
    }

    pub fn record(&mut self, timing: StageTiming) {
        self.stages.push(timing);
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Sum of every recording made under `stage`.
    pub fn stage(&self, stage: &str) -> Option<Duration> {
        let mut matching = self.stages.iter().filter(|s| s.stage == stage).peekable();
        matching.peek()?;
        Some(matching.map(|s| s.duration).sum())
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total().as_secs_f64();
        writeln!(f, "Stage timings:")?;
        writeln!(f, "{:-<60}", "")?;
        for stage in &self.stages {
            let secs = stage.duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            writeln!(f, "{:<30} {:>12.3}ms ({:>5.1}%)", stage.stage, secs * 1000.0, share)?;
        }
        writeln!(f, "{:-<60}", "")?;
        write!(f, "{:<30} {:>12.3}ms", "Total", total * 1000.0)
    }
}

pub struct Stopwatch {
    start: Instant,
    stage: &'static str,
}

impl Stopwatch {
    pub fn start(stage: &'static str) -> Self {
        Self {
            start: Instant::now(),
            stage,
        }
    }

    pub fn stop(self) -> StageTiming {
        StageTiming {
            stage: self.stage,
            duration: self.start.elapsed(),
        }
    }
}

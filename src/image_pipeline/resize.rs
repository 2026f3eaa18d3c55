//! Resampling kernels
//!
//! This module provides the bilinear resampler, the `Resampler` seam used by the
//! pipelines, and an optional divergence probe for comparing a resize against a
//! reference resize without touching the kernel itself.

mod bilinear;
mod divergence;
mod resampler;


pub use bilinear::{BilinearResampler, bilinear_resize};
pub use divergence::{
    CollectingObserver, DEFAULT_DIVERGENCE_THRESHOLD, Divergence, DivergenceObserver, DivergenceProbe,
    TracingObserver,
};
pub use resampler::Resampler;

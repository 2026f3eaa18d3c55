//! Difference artifacts
//!
//! Rendering of difference histograms and heat maps, their deterministic file
//! names, and the PNG / TIFF writers that persist them.

mod naming;
mod png_writer;
mod render;
mod tiff_writer;
mod types;
mod writer;


pub use naming::{artifact_path, sanitize_label};
pub use png_writer::PngArtifactWriter;
pub use render::{coolwarm, render_heatmap, render_histogram};
pub use tiff_writer::TiffArtifactWriter;
pub use types::{ArtifactFormat, ArtifactKind, TiffCompression};
pub use writer::ArtifactWriter;

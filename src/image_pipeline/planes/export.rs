use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::DecodedImage;
use crate::image_pipeline::planes::text_channel::TextChannelWriter;

/// Path of the text dump for one channel: `<stem>_<suffix>_channel.txt`.
pub fn channel_dump_path(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(format!("_{suffix}_channel.txt"));
    PathBuf::from(name)
}

/// Writes every plane of `image` to its own decimal text dump next to `stem`.
pub fn export_channels(image: &DecodedImage, stem: &Path) -> Result<Vec<PathBuf>> {
    let writer = TextChannelWriter;
    let mut written = Vec::with_capacity(image.planes().len());
    for plane in image.planes() {
        let path = channel_dump_path(stem, plane.channel.file_suffix());
        let mut file = File::create(&path)
            .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        writer.write_grid(&plane.grid, &mut file)?;
        info!(
            channel = %plane.channel,
            path = %path.display(),
            "Channel dump written"
        );
        written.push(path);
    }
    Ok(written)
}

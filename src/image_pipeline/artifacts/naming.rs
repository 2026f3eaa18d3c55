use std::path::{Path, PathBuf};

use crate::image_pipeline::artifacts::types::ArtifactKind;
use crate::image_pipeline::grid::Channel;

/// Lowercases a label and collapses every run of non-alphanumerics into `_`.
pub fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// `<dir>/<prefix>[_<channel>]_<a>_<b>.<ext>`
pub fn artifact_path(
    dir: &Path,
    kind: ArtifactKind,
    channel: Option<Channel>,
    label_a: &str,
    label_b: &str,
    extension: &str,
) -> PathBuf {
    let mut name = kind.prefix().to_string();
    if let Some(channel) = channel {
        name.push('_');
        name.push_str(&sanitize_label(&channel.to_string()));
    }
    name.push('_');
    name.push_str(&sanitize_label(label_a));
    name.push('_');
    name.push_str(&sanitize_label(label_b));
    name.push('.');
    name.push_str(extension);
    dir.join(name)
}

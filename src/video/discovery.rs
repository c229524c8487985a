use std::path::Path;

use tracing::debug;

use crate::error::{DiscoveryError, Result};

/// List video files of the given extension directly inside `directory`.
///
/// The extension is accepted with or without a leading dot and matched
/// case-insensitively, so `GOPRO.MP4` and `phone.mp4` land in the same
/// batch without double-counting either on case-insensitive filesystems.
/// Results are sorted lexicographically: the first name becomes the
/// cross-correlation reference, so ordering must not depend on filesystem
/// enumeration order.
///
/// An empty result is not an error here; the pipeline decides whether an
/// empty batch is acceptable.
pub fn list_clips<P: AsRef<Path>>(directory: P, extension: &str) -> Result<Vec<String>> {
    let directory = directory.as_ref();

    if !directory.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: directory.display().to_string(),
        }
        .into());
    }

    let wanted = extension.trim_start_matches('.').to_lowercase();
    let mut names = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();

        if !path.is_file() || is_hidden(&path) {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase() == wanted)
            .unwrap_or(false);

        if matches {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    names.dedup();

    debug!(count = names.len(), directory = %directory.display(), "discovered clips");
    Ok(names)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

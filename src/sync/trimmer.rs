use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::TrimConfig;
use crate::error::{Result, TrimError};
use crate::sync::lags::LagTable;
use crate::video::{ClipSet, MediaCodec};

/// Tolerance when checking a lag against its clip's duration; probe durations
/// are container metadata and can disagree with the audio by a few ms.
const DURATION_EPSILON: f64 = 1e-6;

/// Cuts every clip to the common, time-aligned window.
///
/// Two phases: the head of each clip is discarded up to its lag, then all
/// head-trimmed clips are cut to the duration of the shortest one, so every
/// output covers exactly the same span of real time.
pub struct Trimmer<'a, C: MediaCodec> {
    codec: &'a C,
    naming: &'a TrimConfig,
}

impl<'a, C: MediaCodec> Trimmer<'a, C> {
    pub fn new(codec: &'a C, naming: &'a TrimConfig) -> Self {
        Self { codec, naming }
    }

    /// Write one trimmed output per clip into `output_dir` and return the
    /// output filenames in clip order.
    ///
    /// Outputs are written to a temporary sibling path and renamed into
    /// place; if any clip fails, outputs already produced by this run are
    /// removed so a failed batch leaves nothing behind.
    pub fn trim(
        &self,
        clips: &ClipSet,
        lags: &LagTable,
        output_dir: &Path,
    ) -> Result<Vec<String>> {
        if clips.is_empty() {
            return Err(TrimError::EmptyBatch.into());
        }

        std::fs::create_dir_all(output_dir)?;

        // Phase 1: head-trim amounts and the durations that remain
        let mut head_trimmed = Vec::with_capacity(clips.len());
        for clip in clips.iter() {
            let lag = lags
                .get(&clip.file_name)
                .ok_or_else(|| TrimError::MissingLag {
                    clip: clip.file_name.clone(),
                })?;

            if lag > clip.duration + DURATION_EPSILON {
                return Err(TrimError::LagExceedsDuration {
                    clip: clip.file_name.clone(),
                    lag,
                    duration: clip.duration,
                }
                .into());
            }

            head_trimmed.push((clip, lag, clip.duration - lag));
        }

        // Phase 2: tail-trim everything to the shortest remaining duration
        let min_duration = head_trimmed
            .iter()
            .map(|(_, _, remaining)| *remaining)
            .fold(f64::INFINITY, f64::min);

        info!(min_duration_s = min_duration, "shortest head-trimmed clip");

        let mut written: Vec<PathBuf> = Vec::with_capacity(head_trimmed.len());
        let mut output_names = Vec::with_capacity(head_trimmed.len());

        for (clip, lag, _) in &head_trimmed {
            let out_name = self.output_name(&clip.file_name);
            let final_path = output_dir.join(&out_name);
            let tmp_path = output_dir.join(format!(".tmp-{out_name}"));

            let result = self
                .codec
                .write_subclip(&clip.path, *lag, lag + min_duration, &tmp_path)
                .and_then(|()| {
                    std::fs::rename(&tmp_path, &final_path).map_err(|e| {
                        TrimError::WriteFailed {
                            path: final_path.display().to_string(),
                            reason: e.to_string(),
                        }
                        .into()
                    })
                });

            if let Err(e) = result {
                let _ = std::fs::remove_file(&tmp_path);
                Self::discard_outputs(&written);
                return Err(e);
            }

            info!(
                clip = %clip.file_name,
                output = %out_name,
                head_trim_s = lag,
                duration_s = min_duration,
                "wrote trimmed clip"
            );

            written.push(final_path);
            output_names.push(out_name);
        }

        Ok(output_names)
    }

    /// Derive the output filename: strip the configured optional leading
    /// underscore-delimited token, then apply the output prefix.
    fn output_name(&self, input: &str) -> String {
        let (stem, extension) = match input.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (input, None),
        };

        let stem = match &self.naming.strip_prefix {
            Some(prefix) => stem
                .strip_prefix(&format!("{prefix}_"))
                .filter(|rest| !rest.is_empty())
                .unwrap_or(stem),
            None => stem,
        };

        match extension {
            Some(ext) => format!("{}{stem}.{ext}", self.naming.output_prefix),
            None => format!("{}{stem}", self.naming.output_prefix),
        }
    }

    fn discard_outputs(paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove partial output");
            }
        }
    }
}

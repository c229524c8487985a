use rayon::prelude::*;
use tracing::{debug, info};

use crate::audio::{cross_correlate, zscore_normalize};
use crate::error::{AnalysisError, Result, SyncError};
use crate::video::ClipSet;

/// Per-clip head-trim offsets in seconds.
///
/// Entries keep the clip order of the batch. Invariant: at least one entry is
/// exactly zero (the latest-starting clip) and every entry is non-negative.
#[derive(Debug, Clone)]
pub struct LagTable {
    entries: Vec<(String, f64)>,
}

impl LagTable {
    /// Build a table from raw reference-relative lags, normalizing so the
    /// latest starter maps to zero.
    ///
    /// Raw lags come straight from correlation against the reference clip;
    /// the largest raw lag belongs to the clip that started recording last,
    /// and everything is re-expressed as "seconds to cut from the front
    /// relative to that clip".
    pub(crate) fn from_raw(raw: Vec<(String, f64)>) -> Self {
        let max = raw
            .iter()
            .map(|(_, lag)| *lag)
            .fold(f64::NEG_INFINITY, f64::max);

        let entries = raw
            .into_iter()
            .map(|(name, lag)| (name, max - lag))
            .collect();

        Self { entries }
    }

    /// Lag in seconds for a clip, if present
    pub fn get(&self, clip_name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == clip_name)
            .map(|(_, lag)| *lag)
    }

    /// Entries in clip order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, lag)| (name.as_str(), *lag))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Estimates how far each clip's recording start trails the others by
/// cross-correlating every audio track against the reference clip.
pub struct LagEstimator;

impl LagEstimator {
    /// Compute the normalized lag table for a batch.
    ///
    /// Every clip (the reference included, whose self-correlation pins raw
    /// lag zero) is z-score normalized and correlated against the first clip
    /// in the set. Per-clip correlations are independent and fan out across
    /// the rayon pool; the normalization step is the join point.
    pub fn estimate_lags(clips: &ClipSet, sample_rate: u32) -> Result<LagTable> {
        let reference = clips.reference().ok_or(AnalysisError::EmptyBatch)?;

        let ref_normalized =
            zscore_normalize(&reference.audio.samples).ok_or_else(|| {
                AnalysisError::DegenerateSignal {
                    clip: reference.file_name.clone(),
                }
            })?;

        let raw: Vec<(String, f64)> = clips
            .clips()
            .par_iter()
            .map(|clip| -> std::result::Result<(String, f64), SyncError> {
                let normalized = zscore_normalize(&clip.audio.samples).ok_or_else(|| {
                    AnalysisError::DegenerateSignal {
                        clip: clip.file_name.clone(),
                    }
                })?;

                let shift = cross_correlate(&ref_normalized, &normalized);
                let lag = shift as f64 / sample_rate as f64;
                debug!(clip = %clip.file_name, shift, lag_s = lag, "raw correlation lag");

                Ok((clip.file_name.clone(), lag))
            })
            .collect::<std::result::Result<_, _>>()?;

        info!(
            raw_lags = ?raw.iter().map(|(_, l)| *l).collect::<Vec<_>>(),
            "correlation complete"
        );

        let table = LagTable::from_raw(raw);

        info!(
            normalized_lags = ?table.iter().map(|(_, l)| l).collect::<Vec<_>>(),
            "normalized so the latest starter has lag zero"
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioTrack;
    use crate::video::Clip;
    use std::path::PathBuf;

    fn noise(len: usize) -> Vec<f32> {
        let mut state: u32 = 0x9e37_79b9;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1 << 24) as f32 - 0.5
            })
            .collect()
    }

    fn clip_from(name: &str, samples: Vec<f32>, sample_rate: u32) -> Clip {
        let duration = samples.len() as f64 / sample_rate as f64;
        Clip {
            file_name: name.to_string(),
            path: PathBuf::from(name),
            duration,
            fps: 30.0,
            audio: AudioTrack {
                samples,
                sample_rate,
                duration,
                file_path: PathBuf::from(format!("{name}.wav")),
            },
        }
    }

    #[test]
    fn test_lag_table_invariant() {
        let sample_rate = 48000;
        let scene = noise(48000 * 2);

        // cam_b misses the first 0.25s, cam_c the first 0.125s
        let clips: ClipSet = [
            clip_from("cam_a.mp4", scene.clone(), sample_rate),
            clip_from("cam_b.mp4", scene[12000..].to_vec(), sample_rate),
            clip_from("cam_c.mp4", scene[6000..].to_vec(), sample_rate),
        ]
        .into_iter()
        .collect();

        let table = LagEstimator::estimate_lags(&clips, sample_rate).unwrap();

        let lags: Vec<f64> = table.iter().map(|(_, l)| l).collect();
        let min = lags.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0.0);
        assert!(lags.iter().all(|&l| l >= 0.0));
    }

    #[test]
    fn test_latest_starter_gets_zero() {
        let sample_rate = 48000;
        let scene = noise(48000 * 2);

        let clips: ClipSet = [
            clip_from("cam_a.mp4", scene.clone(), sample_rate),
            clip_from("cam_b.mp4", scene[12000..].to_vec(), sample_rate),
            clip_from("cam_c.mp4", scene[6000..].to_vec(), sample_rate),
        ]
        .into_iter()
        .collect();

        let table = LagEstimator::estimate_lags(&clips, sample_rate).unwrap();

        // cam_b started latest; cam_a must be trimmed by cam_b's full delay
        assert!((table.get("cam_b.mp4").unwrap() - 0.0).abs() < 1e-3);
        assert!((table.get("cam_a.mp4").unwrap() - 0.25).abs() < 1e-3);
        assert!((table.get("cam_c.mp4").unwrap() - 0.125).abs() < 1e-3);
    }

    #[test]
    fn test_single_clip_gets_zero_lag() {
        let sample_rate = 48000;
        let clips: ClipSet = [clip_from("solo.mp4", noise(48000), sample_rate)]
            .into_iter()
            .collect();

        let table = LagEstimator::estimate_lags(&clips, sample_rate).unwrap();
        assert_eq!(table.get("solo.mp4"), Some(0.0));
    }

    #[test]
    fn test_silent_clip_is_degenerate() {
        let sample_rate = 48000;
        let clips: ClipSet = [
            clip_from("cam_a.mp4", noise(48000), sample_rate),
            clip_from("silent.mp4", vec![0.0; 48000], sample_rate),
        ]
        .into_iter()
        .collect();

        let result = LagEstimator::estimate_lags(&clips, sample_rate);
        assert!(matches!(
            result,
            Err(SyncError::Analysis(AnalysisError::DegenerateSignal { .. }))
        ));
    }

    #[test]
    fn test_empty_batch_fails() {
        let clips = ClipSet::new();
        let result = LagEstimator::estimate_lags(&clips, 48000);
        assert!(matches!(
            result,
            Err(SyncError::Analysis(AnalysisError::EmptyBatch))
        ));
    }
}

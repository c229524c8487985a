use std::path::Path;

use tracing::info;

use crate::audio::AudioLoader;
use crate::error::{MediaError, Result};
use crate::video::codec::MediaCodec;
use crate::video::types::{Clip, ClipSet};

/// Loads a batch of clips: probes each container, extracts its audio track
/// to the intermediate directory, and decodes that audio into memory.
pub struct MediaLoader<'a, C: MediaCodec> {
    codec: &'a C,
}

impl<'a, C: MediaCodec> MediaLoader<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    /// Load every file in `filenames` from `raw_dir`, extracting audio into
    /// `audio_dir` (created if absent).
    ///
    /// Returns the clips in input order together with the per-clip audio
    /// sample rates for the consistency gate. Fail-fast: the first file that
    /// cannot be decoded aborts the whole batch.
    pub async fn load(
        &self,
        raw_dir: &Path,
        audio_dir: &Path,
        filenames: &[String],
    ) -> Result<(ClipSet, Vec<u32>)> {
        std::fs::create_dir_all(audio_dir)?;

        let mut clips = ClipSet::new();
        let mut sample_rates = Vec::with_capacity(filenames.len());

        for name in filenames {
            let video_path = raw_dir.join(name);
            let info = self.codec.probe(&video_path)?;

            let stem = Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name.as_str());
            let wav_path = audio_dir.join(format!("{stem}.wav"));

            self.codec.extract_audio(&video_path, &wav_path)?;
            let audio = AudioLoader::load(&wav_path).await?;

            if audio.is_empty() {
                return Err(MediaError::DecodeFailed {
                    path: video_path.display().to_string(),
                }
                .into());
            }

            info!(
                clip = %name,
                duration_s = info.duration,
                fps = info.fps,
                sample_rate_hz = audio.sample_rate,
                "loaded clip"
            );

            sample_rates.push(audio.sample_rate);
            clips.push(Clip {
                file_name: name.clone(),
                path: video_path,
                duration: info.duration,
                fps: info.fps,
                audio,
            });
        }

        Ok((clips, sample_rates))
    }
}

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{MediaError, Result, TrimError};

/// Container-level metadata reported by a codec probe
#[derive(Debug, Clone, Copy)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,

    /// Video frame rate in frames per second
    pub fps: f64,
}

/// Capability seam around the heavy, replaceable media dependency.
///
/// The synchronization core only ever needs three things from a video
/// container: its duration and frame rate, a mono WAV of its audio track at
/// the native sample rate, and a time-sliced copy. Everything else about
/// decoding and encoding stays behind this trait.
pub trait MediaCodec: Send + Sync {
    /// Query duration and frame rate of a video file
    fn probe(&self, video: &Path) -> Result<MediaInfo>;

    /// Extract the audio track as mono WAV at its native sample rate
    fn extract_audio(&self, video: &Path, wav_out: &Path) -> Result<()>;

    /// Write the `[start, end)` slice of a video to `output`
    fn write_subclip(&self, video: &Path, start: f64, end: f64, output: &Path) -> Result<()>;
}

/// `MediaCodec` backed by ffmpeg/ffprobe subprocesses
pub struct FfmpegCodec {
    ffmpeg_bin: String,
    ffprobe_bin: String,
}

impl FfmpegCodec {
    pub fn new() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
        }
    }

    /// Use specific binary paths instead of relying on PATH lookup
    pub fn with_binaries<S: Into<String>>(ffmpeg: S, ffprobe: S) -> Self {
        Self {
            ffmpeg_bin: ffmpeg.into(),
            ffprobe_bin: ffprobe.into(),
        }
    }

    /// Run a command, capturing stdout; non-zero exit becomes an error with
    /// the tool's stderr as the reason
    fn run(bin: &str, args: &[&str]) -> std::result::Result<String, String> {
        debug!(command = bin, ?args, "running media tool");

        let output = Command::new(bin)
            .args(args)
            .output()
            .map_err(|e| format!("failed to spawn {bin}: {e}"))?;

        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).into_owned());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn probe_entry(&self, video: &Path, selector: &[&str]) -> std::result::Result<String, String> {
        let video_str = video.to_str().ok_or("non-UTF8 path")?;

        let mut args = vec!["-v", "error"];
        args.extend_from_slice(selector);
        args.extend_from_slice(&[
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            video_str,
        ]);

        Ok(Self::run(&self.ffprobe_bin, &args)?.trim().to_string())
    }

    /// Parse ffprobe rate strings of the form "30000/1001" or "25"
    fn parse_rate(value: &str) -> Option<f64> {
        match value.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().ok()?;
                let den: f64 = den.trim().parse().ok()?;
                (den != 0.0).then(|| num / den)
            }
            None => value.trim().parse().ok(),
        }
    }
}

impl Default for FfmpegCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaCodec for FfmpegCodec {
    fn probe(&self, video: &Path) -> Result<MediaInfo> {
        let path = video.display().to_string();

        let duration_raw = self
            .probe_entry(video, &["-show_entries", "format=duration"])
            .map_err(|reason| MediaError::ProbeFailed {
                path: path.clone(),
                reason,
            })?;
        let duration: f64 = duration_raw.parse().map_err(|_| MediaError::ProbeFailed {
            path: path.clone(),
            reason: format!("unparseable duration '{duration_raw}'"),
        })?;

        let rate_raw = self
            .probe_entry(
                video,
                &[
                    "-select_streams",
                    "v:0",
                    "-show_entries",
                    "stream=r_frame_rate",
                ],
            )
            .map_err(|reason| MediaError::ProbeFailed {
                path: path.clone(),
                reason,
            })?;
        let fps = Self::parse_rate(&rate_raw).ok_or_else(|| MediaError::ProbeFailed {
            path: path.clone(),
            reason: format!("unparseable frame rate '{rate_raw}'"),
        })?;

        Ok(MediaInfo { duration, fps })
    }

    fn extract_audio(&self, video: &Path, wav_out: &Path) -> Result<()> {
        let video_str = video.to_str().ok_or_else(|| MediaError::ExtractFailed {
            path: video.display().to_string(),
            reason: "non-UTF8 path".to_string(),
        })?;
        let out_str = wav_out.to_str().ok_or_else(|| MediaError::ExtractFailed {
            path: video.display().to_string(),
            reason: "non-UTF8 output path".to_string(),
        })?;

        // Mono, native sample rate: the rate consistency gate must see what
        // each camera actually recorded
        Self::run(
            &self.ffmpeg_bin,
            &[
                "-y", "-i", video_str, "-vn", "-ac", "1", "-acodec", "pcm_s16le", "-f", "wav",
                out_str,
            ],
        )
        .map_err(|reason| MediaError::ExtractFailed {
            path: video.display().to_string(),
            reason,
        })?;

        Ok(())
    }

    fn write_subclip(&self, video: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
        let video_str = video.to_str().ok_or_else(|| TrimError::WriteFailed {
            path: output.display().to_string(),
            reason: "non-UTF8 input path".to_string(),
        })?;
        let out_str = output.to_str().ok_or_else(|| TrimError::WriteFailed {
            path: output.display().to_string(),
            reason: "non-UTF8 output path".to_string(),
        })?;

        // -ss after -i: slower but frame-accurate, which is the whole point
        Self::run(
            &self.ffmpeg_bin,
            &[
                "-y",
                "-i",
                video_str,
                "-ss",
                &format!("{start:.6}"),
                "-to",
                &format!("{end:.6}"),
                out_str,
            ],
        )
        .map_err(|reason| TrimError::WriteFailed {
            path: output.display().to_string(),
            reason,
        })?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(FfmpegCodec::parse_rate("25"), Some(25.0));
        assert_eq!(FfmpegCodec::parse_rate("30000/1001"), Some(30000.0 / 1001.0));
        assert_eq!(FfmpegCodec::parse_rate("60/0"), None);
        assert_eq!(FfmpegCodec::parse_rate("abc"), None);
    }

    #[test]
    fn test_missing_binary_reports_tool_failure() {
        let codec = FfmpegCodec::with_binaries("definitely-not-ffmpeg", "definitely-not-ffprobe");
        let result = codec.probe(Path::new("whatever.mp4"));
        assert!(matches!(
            result,
            Err(crate::error::SyncError::Media(MediaError::ProbeFailed { .. }))
        ));
    }
}

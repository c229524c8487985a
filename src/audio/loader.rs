use std::path::Path;

use crate::audio::types::AudioTrack;
use crate::error::{MediaError, Result};

/// WAV audio loader
///
/// The pipeline always ingests audio from the intermediate WAV files the
/// media codec extracts, so WAV is the only format handled here.
pub struct AudioLoader;

impl AudioLoader {
    /// Load a WAV file and return its samples downmixed to mono at the
    /// file's native sample rate
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<AudioTrack> {
        let path = path.as_ref();

        let reader = hound::WavReader::open(path).map_err(|e| MediaError::AudioReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let spec = reader.spec();
        let sample_rate = spec.sample_rate;
        let channels = spec.channels;

        // Convert samples to f32
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| MediaError::AudioReadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?,
            hound::SampleFormat::Int => {
                let bit_depth = spec.bits_per_sample;
                let ints: std::result::Result<Vec<i32>, _> = reader.into_samples().collect();

                ints.map_err(|e| MediaError::AudioReadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
                .into_iter()
                .map(|sample| Self::int_to_float(sample, bit_depth))
                .collect()
            }
        };

        let samples = Self::mono_mix(&samples, channels);
        let duration = samples.len() as f64 / sample_rate as f64;

        Ok(AudioTrack {
            samples,
            sample_rate,
            duration,
            file_path: path.to_path_buf(),
        })
    }

    /// Convert integer sample to float (-1.0 to 1.0)
    fn int_to_float(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => (sample as f32 - 128.0) / 128.0,
            16 => sample as f32 / 32768.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            _ => sample as f32 / 32768.0, // Default to 16-bit
        }
    }

    /// Downmix interleaved samples to mono by averaging channels
    fn mono_mix(samples: &[f32], channels: u16) -> Vec<f32> {
        if channels <= 1 {
            return samples.to_vec();
        }

        let mut mono = Vec::with_capacity(samples.len() / channels as usize);

        for chunk in samples.chunks(channels as usize) {
            let sum: f32 = chunk.iter().sum();
            mono.push(sum / channels as f32);
        }

        mono
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_test_wav(path: &Path, samples: &[i16], channels: u16, sample_rate: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_int_to_float_conversion() {
        assert_eq!(AudioLoader::int_to_float(0, 16), 0.0);
        assert_eq!(AudioLoader::int_to_float(32767, 16), 32767.0 / 32768.0);
        assert_eq!(AudioLoader::int_to_float(-32768, 16), -1.0);

        assert_eq!(AudioLoader::int_to_float(128, 8), 0.0);
        assert_eq!(AudioLoader::int_to_float(0, 8), -1.0);
    }

    #[test]
    fn test_mono_mix() {
        let stereo = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // L, R, L, R, L, R
        let mono = AudioLoader::mono_mix(&stereo, 2);
        assert_eq!(mono, vec![1.5, 3.5, 5.5]);

        let already_mono = AudioLoader::mono_mix(&stereo, 1);
        assert_eq!(already_mono, stereo);
    }

    #[tokio::test]
    async fn test_load_stereo_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.wav");

        // 100 stereo frames at 48 kHz
        let samples: Vec<i16> = (0..200).map(|i| (i % 100) as i16 * 100).collect();
        write_test_wav(&path, &samples, 2, 48000);

        let track = AudioLoader::load(&path).await.unwrap();
        assert_eq!(track.sample_rate, 48000);
        assert_eq!(track.len(), 100);
        assert!((track.duration - 100.0 / 48000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = AudioLoader::load(dir.path().join("nope.wav")).await;
        assert!(matches!(
            result,
            Err(crate::error::SyncError::Media(
                MediaError::AudioReadFailed { .. }
            ))
        ));
    }
}

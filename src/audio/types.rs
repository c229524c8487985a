use std::path::PathBuf;

/// Decoded mono audio with metadata
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Mono audio samples
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Duration in seconds
    pub duration: f64,

    /// Original file path
    pub file_path: PathBuf,
}

impl AudioTrack {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the track holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get time in seconds for a sample index
    pub fn time_for_sample(&self, sample_index: usize) -> f64 {
        sample_index as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_for_sample() {
        let track = AudioTrack {
            samples: vec![0.0; 48000],
            sample_rate: 48000,
            duration: 1.0,
            file_path: PathBuf::from("test.wav"),
        };

        assert_eq!(track.time_for_sample(0), 0.0);
        assert_eq!(track.time_for_sample(24000), 0.5);
        assert_eq!(track.len(), 48000);
        assert!(!track.is_empty());
    }
}

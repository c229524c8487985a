use std::path::PathBuf;

use crate::audio::AudioTrack;

/// One camera recording in a synchronization batch
///
/// Identity is the source filename. Every clip in a batch must share the
/// sample rate and frame rate of its peers; the pipeline verifies this
/// before any correlation work.
#[derive(Debug, Clone)]
pub struct Clip {
    /// Source filename (identity within the batch)
    pub file_name: String,

    /// Full path to the source video
    pub path: PathBuf,

    /// Duration in seconds
    pub duration: f64,

    /// Video frame rate in frames per second
    pub fps: f64,

    /// Extracted audio track
    pub audio: AudioTrack,
}

/// An ordered set of clips treated as one synchronization unit.
///
/// Order is insertion order from discovery; the first clip is the
/// cross-correlation reference for all others.
#[derive(Debug, Clone, Default)]
pub struct ClipSet {
    clips: Vec<Clip>,
}

impl ClipSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self { clips: Vec::new() }
    }

    /// Append a clip, preserving insertion order
    pub fn push(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// The reference clip, if any
    pub fn reference(&self) -> Option<&Clip> {
        self.clips.first()
    }

    /// All clips in insertion order
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Iterate over clips in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }
}

impl FromIterator<Clip> for ClipSet {
    fn from_iter<I: IntoIterator<Item = Clip>>(iter: I) -> Self {
        Self {
            clips: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_clip(name: &str) -> Clip {
        Clip {
            file_name: name.to_string(),
            path: PathBuf::from(name),
            duration: 1.0,
            fps: 30.0,
            audio: AudioTrack {
                samples: vec![0.0; 10],
                sample_rate: 48000,
                duration: 1.0,
                file_path: PathBuf::from("a.wav"),
            },
        }
    }

    #[test]
    fn test_insertion_order_determines_reference() {
        let set: ClipSet = ["cam_b.mp4", "cam_a.mp4"]
            .iter()
            .map(|n| make_clip(n))
            .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.reference().unwrap().file_name, "cam_b.mp4");
    }

    #[test]
    fn test_empty_set() {
        let set = ClipSet::new();
        assert!(set.is_empty());
        assert!(set.reference().is_none());
    }
}

//! # Audio Module
//!
//! WAV ingestion and the signal processing used for lag estimation.

pub mod correlate;
pub mod loader;
pub mod types;

pub use correlate::{cross_correlate, zscore_normalize};
pub use loader::AudioLoader;
pub use types::AudioTrack;

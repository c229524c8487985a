//! # Camsync
//!
//! Synchronize multi-camera recordings of the same scene by aligning their
//! audio tracks, then trim every clip to the common window so all outputs
//! start and end at the same moment of real time.
//!
//! Cameras are started by hand, so each clip begins at a slightly different
//! moment. The audio they all recorded is the alignment signal: each clip's
//! track is cross-correlated against the first clip in the batch, the
//! correlation peak gives its relative start offset, and the offsets become
//! per-clip head trims with the latest starter pinned at zero.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use camsync::{
//!     config::{Config, SessionPaths},
//!     sync::SyncEngine,
//!     video::FfmpegCodec,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let session = SessionPaths::new("/data/sessions/2026-03-14", &config.layout);
//!
//! let engine = SyncEngine::new(config, FfmpegCodec::new());
//! let outputs = engine.run(&session).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`video`] - Clip discovery, container probing, and the codec seam
//! - [`audio`] - WAV decoding and FFT cross-correlation
//! - [`sync`] - Rate gates, lag estimation, trimming, and the pipeline driver
//! - [`config`] - Configuration and session directory layout

pub mod audio;
pub mod config;
pub mod error;
pub mod sync;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::{Config, SessionPaths},
    error::{Result, SyncError},
    sync::SyncEngine,
    video::{FfmpegCodec, MediaCodec},
};

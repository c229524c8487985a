//! # Video Module
//!
//! Clip discovery, container metadata, and the media codec seam. Actual
//! decode/encode work happens outside the process, behind [`MediaCodec`].

pub mod codec;
pub mod discovery;
pub mod loader;
pub mod types;

pub use codec::{FfmpegCodec, MediaCodec, MediaInfo};
pub use discovery::list_clips;
pub use loader::MediaLoader;
pub use types::{Clip, ClipSet};

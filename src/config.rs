use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for camsync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Clip discovery settings
    pub discovery: DiscoveryConfig,

    /// Session directory layout
    pub layout: LayoutConfig,

    /// Trim and output-naming settings
    pub trim: TrimConfig,

    /// Synchronization settings
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            layout: LayoutConfig::default(),
            trim: TrimConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.discovery.validate()?;
        self.layout.validate()?;
        self.sync.validate()?;
        Ok(())
    }
}

/// Clip discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Video file extension to match, with or without a leading dot,
    /// case-insensitive
    pub extension: String,

    /// Treat an empty discovery result as a successful no-op instead of
    /// an error
    pub allow_empty: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: "mp4".to_string(),
            allow_empty: false,
        }
    }
}

impl DiscoveryConfig {
    fn validate(&self) -> Result<()> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "discovery.extension".to_string(),
                value: self.extension.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// Directory names under a session base path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Input videos
    pub raw_dir: String,

    /// Intermediate extracted audio, created if missing
    pub audio_dir: String,

    /// Synchronized output videos, created if missing
    pub synced_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            raw_dir: "RawVideos".to_string(),
            audio_dir: "AudioFiles".to_string(),
            synced_dir: "SyncedVideos".to_string(),
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("layout.raw_dir", &self.raw_dir),
            ("layout.audio_dir", &self.audio_dir),
            ("layout.synced_dir", &self.synced_dir),
        ] {
            if value.is_empty() || value.contains(std::path::MAIN_SEPARATOR) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Trim and output-naming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrimConfig {
    /// Optional leading underscore-delimited token stripped from input names
    /// before the output prefix is applied (e.g. "raw" turns
    /// `raw_cam1.mp4` into `synced_cam1.mp4`)
    pub strip_prefix: Option<String>,

    /// Prefix applied to every output filename
    pub output_prefix: String,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            strip_prefix: Some("raw".to_string()),
            output_prefix: "synced_".to_string(),
        }
    }
}

/// Synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Number of worker threads for per-clip correlation
    pub threads: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl SyncConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sync.threads".to_string(),
                value: self.threads.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Resolved directory paths for one capture session.
///
/// All steps take these paths explicitly; nothing in the pipeline depends on
/// the process working directory.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    /// Session base directory
    pub base: PathBuf,

    /// Input videos
    pub raw: PathBuf,

    /// Intermediate extracted audio
    pub audio: PathBuf,

    /// Synchronized outputs
    pub synced: PathBuf,
}

impl SessionPaths {
    /// Resolve session paths from a base directory and layout
    pub fn new<P: AsRef<Path>>(base: P, layout: &LayoutConfig) -> Self {
        let base = base.as_ref().to_path_buf();
        Self {
            raw: base.join(&layout.raw_dir),
            audio: base.join(&layout.audio_dir),
            synced: base.join(&layout.synced_dir),
            base,
        }
    }
}

use thiserror::Error;

/// Main error type for the camsync library
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Clip discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Media processing error: {0}")]
    Media(#[from] MediaError),

    #[error("Audio analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Trim error: {0}")]
    Trim(#[from] TrimError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discovery-specific errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no input clips with extension '{extension}' found in {path}")]
    NoInputFound { path: String, extension: String },

    #[error("input directory not found: {path}")]
    DirectoryNotFound { path: String },
}

/// Media decode/encode errors
///
/// Any of these abort the whole batch: there is no skip-and-continue mode,
/// because the trim phase needs a globally consistent minimum duration.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("failed to decode media file: {path}")]
    DecodeFailed { path: String },

    #[error("failed to probe media file {path}: {reason}")]
    ProbeFailed { path: String, reason: String },

    #[error("failed to extract audio from {path}: {reason}")]
    ExtractFailed { path: String, reason: String },

    #[error("failed to read audio file {path}: {reason}")]
    AudioReadFailed { path: String, reason: String },
}

/// Signal analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no rates given, cannot verify batch consistency")]
    EmptyBatch,

    #[error("rates are not equal across clips: {rates}")]
    InconsistentRates { rates: String },

    #[error("signal from '{clip}' has no variance, cannot z-score normalize")]
    DegenerateSignal { clip: String },
}

/// Trim-phase errors
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("lag {lag:.3}s exceeds duration {duration:.3}s of clip '{clip}'")]
    LagExceedsDuration {
        clip: String,
        lag: f64,
        duration: f64,
    },

    #[error("failed to write trimmed clip {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("no lag entry for clip '{clip}'")]
    MissingLag { clip: String },

    #[error("no clips to trim")]
    EmptyBatch,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

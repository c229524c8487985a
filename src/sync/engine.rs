use tracing::info;

use crate::config::{Config, SessionPaths};
use crate::error::{ConfigError, DiscoveryError, Result};
use crate::sync::lags::LagEstimator;
use crate::sync::rates::check_equal;
use crate::sync::trimmer::Trimmer;
use crate::video::{discovery, MediaCodec, MediaLoader};

/// Pipeline driver: discovery, load, rate gates, lag estimation, trim.
///
/// Every stage is batch-fatal on error. Trimming needs one sample rate and
/// one minimum duration across the whole batch, so there is no mode where
/// some clips sync and others are skipped.
pub struct SyncEngine<C: MediaCodec> {
    config: Config,
    codec: C,
}

impl<C: MediaCodec> SyncEngine<C> {
    pub fn new(config: Config, codec: C) -> Self {
        Self { config, codec }
    }

    /// Synchronize and trim every clip in a session directory.
    ///
    /// Returns the output filenames written to the synced directory, in
    /// clip order. An empty discovery result returns an empty list only
    /// when `discovery.allow_empty` is set; otherwise it is an error.
    pub async fn run(&self, session: &SessionPaths) -> Result<Vec<String>> {
        info!(session = %session.base.display(), "starting synchronization");

        // Step 1: clip discovery
        let names = discovery::list_clips(&session.raw, &self.config.discovery.extension)?;

        if names.is_empty() {
            if self.config.discovery.allow_empty {
                info!("no input clips found, nothing to do");
                return Ok(Vec::new());
            }
            return Err(DiscoveryError::NoInputFound {
                path: session.raw.display().to_string(),
                extension: self.config.discovery.extension.clone(),
            }
            .into());
        }

        info!(clips = ?names, reference = %names[0], "discovered batch");

        // Step 2: decode containers, extract audio
        let loader = MediaLoader::new(&self.codec);
        let (clips, sample_rates) = loader
            .load(&session.raw, &session.audio, &names)
            .await?;

        // Step 3: rate consistency gates, before any correlation work
        let fps_list: Vec<f64> = clips.iter().map(|c| c.fps).collect();
        let fps = check_equal(&fps_list)?;
        let sample_rate = check_equal(&sample_rates)?;
        info!(fps, sample_rate_hz = sample_rate, "batch rates are consistent");

        // Step 4: lag estimation on a pool sized from config
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.sync.threads)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "sync.threads".to_string(),
                value: e.to_string(),
            })?;
        let lag_table = pool.install(|| LagEstimator::estimate_lags(&clips, sample_rate))?;

        // Step 5: trim to the common window
        let trimmer = Trimmer::new(&self.codec, &self.config.trim);
        let outputs = trimmer.trim(&clips, &lag_table, &session.synced)?;

        info!(count = outputs.len(), outputs = ?outputs, "synchronization complete");
        Ok(outputs)
    }
}

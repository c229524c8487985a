use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use camsync::{
    config::{Config, SessionPaths},
    sync::SyncEngine,
    video::FfmpegCodec,
};

#[derive(Parser)]
#[command(
    name = "camsync",
    version,
    about = "Synchronize and trim multi-camera recordings by their audio",
    long_about = "Camsync aligns independently started camera recordings of the same scene by cross-correlating their audio tracks, then trims every clip so all outputs cover exactly the same window of real time."
)]
struct Cli {
    /// Session directory containing the raw video folder
    session: PathBuf,

    /// Video file extension to discover (overrides the config file)
    #[arg(short, long)]
    extension: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting camsync v{}", env!("CARGO_PKG_VERSION"));
    info!("Session: {:?}", cli.session);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(extension) = cli.extension {
        config.discovery.extension = extension;
    }
    config.validate()?;

    let session = SessionPaths::new(&cli.session, &config.layout);

    let started = Instant::now();
    let engine = SyncEngine::new(config, FfmpegCodec::new());
    let outputs = engine.run(&session).await?;

    info!(
        "Synchronized {} clip(s) in {:.2}s, outputs in {:?}",
        outputs.len(),
        started.elapsed().as_secs_f64(),
        session.synced
    );
    Ok(())
}

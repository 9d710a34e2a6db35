//! Kick detection replay: feeds recorded pose frames through the detector.

use anyhow::Result;
use clap::Parser;
use kick_detection::{
    app::{AppConfig, InputSource, ReplayApp},
    cli::Args,
    config::{Config, EXAMPLE_CONFIG},
};
use log::info;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Kick Detection");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_overrides(&mut config)?;

    let app_config = AppConfig {
        input: InputSource::from_arg(&args.input),
        config,
    };

    // Create and run application
    let mut app = ReplayApp::new(app_config)?;
    app.run()?;

    Ok(())
}

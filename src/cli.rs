//! Command-line arguments for the replay binary.

use crate::config::{Config, HorizontalOffsetGuard, OutputFormat};
use crate::cooldown::CooldownScope;
use crate::Result;
use clap::Parser;
use log::warn;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Detect left/right kicks in a recorded pose stream",
    long_about = None
)]
pub struct Args {
    /// JSON-lines pose frames to replay (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<String>,

    /// Cooldown scope (per_limb, shared)
    #[arg(long)]
    pub cooldown_scope: Option<String>,

    /// Cooldown duration in milliseconds
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Require the ankle to be at least this far outward of the hip
    #[arg(long)]
    pub min_offset: Option<f64>,

    /// Camera image is mirrored (flips the outward direction)
    #[arg(long)]
    pub mirrored: bool,

    /// Output format (text, json)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(scope) = &self.cooldown_scope {
            config.detection.cooldown_scope = scope.parse::<CooldownScope>()?;
        }
        if let Some(ms) = self.cooldown_ms {
            config.detection.cooldown_ms = ms;
        }
        if let Some(min_offset) = self.min_offset {
            config.detection.horizontal_offset = Some(HorizontalOffsetGuard {
                min_offset,
                mirrored: self.mirrored,
            });
        } else if self.mirrored {
            match config.detection.horizontal_offset.as_mut() {
                Some(guard) => guard.mirrored = true,
                None => {
                    warn!("--mirrored has no effect without a horizontal offset guard; ignoring")
                }
            }
        }
        if let Some(format) = &self.output {
            config.output.format = format.parse::<OutputFormat>()?;
        }
        Ok(())
    }
}

//! Replay application: pose frames in, kick events out.
//!
//! Reads one JSON pose frame per line, runs the detector over the stream and
//! writes every detected kick to the output, either as its wire label or as
//! a JSON event.

use crate::{
    config::{Config, OutputFormat},
    detector::KickDetector,
    error::Result,
    limb::LimbSide,
    pose::PoseFrame,
    sink::KickEvent,
};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Where pose frames come from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// JSON-lines file
    File(PathBuf),
}

impl InputSource {
    /// `-` means standard input, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Frame source
    pub input: InputSource,
    /// Detector and output settings
    pub config: Config,
}

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Frames decoded and fed to the detector
    pub frames: usize,
    /// Lines that could not be decoded
    pub skipped_lines: usize,
    /// Left kicks emitted
    pub left_kicks: usize,
    /// Right kicks emitted
    pub right_kicks: usize,
}

impl ReplayStats {
    fn record(&mut self, event: &KickEvent) {
        match event.side {
            LimbSide::Left => self.left_kicks += 1,
            LimbSide::Right => self.right_kicks += 1,
        }
    }

    pub fn total_kicks(&self) -> usize {
        self.left_kicks + self.right_kicks
    }
}

/// Main application struct
pub struct ReplayApp {
    config: AppConfig,
    detector: KickDetector,
}

impl ReplayApp {
    /// Create a new replay application
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing kick detection replay");
        config.config.validate()?;
        let detector = KickDetector::new(config.config.detection.clone())?;
        Ok(Self { config, detector })
    }

    /// Replay the configured input to standard output
    pub fn run(&mut self) -> Result<ReplayStats> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let input = self.config.input.clone();
        let stats = match input {
            InputSource::Stdin => {
                info!("Reading pose frames from stdin");
                let stdin = io::stdin();
                let reader = stdin.lock();
                self.replay(reader, &mut out)?
            }
            InputSource::File(path) => {
                info!("Reading pose frames from {}", path.display());
                let reader = BufReader::new(File::open(path)?);
                self.replay(reader, &mut out)?
            }
        };

        info!(
            "Replay finished: {} frames, {} skipped lines, {} left kicks, {} right kicks",
            stats.frames, stats.skipped_lines, stats.left_kicks, stats.right_kicks
        );
        Ok(stats)
    }

    /// Replay frames from `reader`, writing detected kicks to `writer`
    ///
    /// Lines that are not valid UTF-8 or not a valid frame are logged and
    /// skipped; only read and write failures end the replay.
    pub fn replay<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        writer: &mut W,
    ) -> Result<ReplayStats> {
        let format = self.config.config.output.format;
        let mut stats = ReplayStats::default();

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line.trim(),
                Err(e) => {
                    warn!("Skipping line {}: {}", index + 1, e);
                    stats.skipped_lines += 1;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let frame = match PoseFrame::from_json(line) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Skipping line {}: {}", index + 1, e);
                    stats.skipped_lines += 1;
                    continue;
                }
            };
            stats.frames += 1;

            let mut write_error = None;
            self.detector.process_frame(&frame, &mut |event: &KickEvent| {
                stats.record(event);
                if write_error.is_none() {
                    write_error = write_event(&mut *writer, event, format).err();
                }
            });
            if let Some(e) = write_error {
                return Err(e);
            }
        }

        writer.flush()?;
        Ok(stats)
    }

    pub fn detector(&self) -> &KickDetector {
        &self.detector
    }
}

fn write_event<W: Write>(writer: &mut W, event: &KickEvent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{}", event.wire_label())?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, event)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

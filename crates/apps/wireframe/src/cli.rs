//! Command line arguments

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::location::DEFAULT_LOCATION;
use crate::size::GridSize;

/// Animated displaced wireframe grid
#[derive(Parser, Debug, Clone)]
#[command(name = "wireframe", version)]
pub struct Cli {
    /// Load configuration from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Application location; its `size` query parameter selects the grid preset
    #[arg(long, short = 'l', value_name = "URL", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Override the location's size preset (small, medium, big)
    #[arg(long, short = 's', value_name = "SIZE")]
    pub size: Option<GridSize>,

    /// Render N frames then exit
    #[arg(long, value_name = "FRAMES")]
    pub frames: Option<u64>,

    /// Save the last rendered frame as PNG before exiting
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,

    /// Log grid statistics without opening a window
    #[arg(long)]
    pub headless: bool,
}

/// Bounded run requested with `--frames` and/or `--screenshot`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLimit {
    pub frames: u64,
    pub screenshot: Option<PathBuf>,
}

impl Cli {
    /// Location with `--size` applied
    pub fn resolved_location(&self) -> String {
        match self.size {
            Some(size) => size.apply_to_location(&self.location),
            None => self.location.clone(),
        }
    }

    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    /// A screenshot without `--frames` captures the first frame
    pub fn frame_limit(&self) -> Option<FrameLimit> {
        match (self.frames, &self.screenshot) {
            (None, None) => None,
            (frames, screenshot) => Some(FrameLimit {
                frames: frames.unwrap_or(1).max(1),
                screenshot: screenshot.clone(),
            }),
        }
    }
}

use std::path::{Path, PathBuf};

use glam::Vec2;
use renderer::{CameraPath, GridStyle};
use serde::Deserialize;
use thiserror::Error;

use crate::params::Params;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "crates/apps/wireframe/config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration loaded from config.toml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct WireframeConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub params: ParamsConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Wireframe".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Extents of the plane in world units
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 150.0,
            height: 100.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// `[near, far]`
    pub fog_distance: [f32; 2],
    pub line_feather: f32,
    pub noise_offset: f32,
    pub inverse: bool,
    pub same_as_background: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fog_distance: [0.0, 140.0],
            line_feather: 0.5,
            noise_offset: 100.0,
            inverse: true,
            same_as_background: false,
        }
    }
}

/// Initial panel values
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParamsConfig {
    pub background: [u8; 3],
    pub mesh: [u8; 3],
    pub displacement: f32,
    pub line_thickness: f32,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        let params = Params::default();
        Self {
            background: params.background_color,
            mesh: params.mesh_color,
            displacement: params.displacement,
            line_thickness: params.line_thickness,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub radius_x: f32,
    pub amplitude_y: f32,
    pub depth: f32,
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let path = CameraPath::default();
        Self {
            radius_x: path.radius_x,
            amplitude_y: path.amplitude_y,
            depth: path.depth,
            speed: path.speed,
        }
    }
}

impl WireframeConfig {
    pub fn grid_style(&self) -> GridStyle {
        GridStyle {
            fog_distance: Vec2::from_array(self.style.fog_distance),
            line_feather: self.style.line_feather,
            noise_offset: self.style.noise_offset,
        }
    }

    pub fn camera_path(&self) -> CameraPath {
        CameraPath {
            radius_x: self.camera.radius_x,
            amplitude_y: self.camera.amplitude_y,
            depth: self.camera.depth,
            speed: self.camera.speed,
        }
    }

    /// Starting panel state, passed through the same clamping as panel edits
    pub fn initial_params(&self) -> Params {
        use crate::params::ParamsUpdate::*;

        Params::default().apply_all([
            BackgroundColor(self.params.background),
            MeshColor(self.params.mesh),
            Displacement(self.params.displacement),
            LineThickness(self.params.line_thickness),
            Inverse(self.style.inverse),
            SameAsBackground(self.style.same_as_background),
        ])
    }
}

pub fn parse_config(source: &str, path: &Path) -> Result<WireframeConfig, ConfigError> {
    toml::from_str(source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from `path`
///
/// A missing file falls back to the defaults; an unreadable or malformed one
/// is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<WireframeConfig, ConfigError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => {
            let config = parse_config(&source, path)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Config {} not found, using defaults", path.display());
            Ok(WireframeConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

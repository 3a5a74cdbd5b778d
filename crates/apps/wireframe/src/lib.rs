//! Animated displaced wireframe grid
//!
//! Opens a window showing a subdivided plane whose vertices are pushed along
//! their normals by animated noise, drawn as an anti-aliased wireframe with
//! distance fog. A side panel tunes colors, displacement and line width; the
//! grid resolution preset lives in the application location and changing it
//! reloads the scene.

pub mod app;
pub mod cli;
pub mod config;
pub mod egui_integration;
pub mod location;
pub mod panel;
pub mod params;
pub mod scene;
pub mod size;

pub use app::{WireframeApp, run};
pub use cli::{Cli, FrameLimit};
pub use config::{ConfigError, WireframeConfig, load_config};
pub use location::{get_parameter_by_name, get_parameter_by_name_int, replace_url_param};
pub use params::{Params, ParamsUpdate};
pub use scene::{Scene, SceneReport};
pub use size::GridSize;

//! Displaced wireframe grid renderer
//!
//! GL side of the wireframe scene: a single program that pushes grid
//! vertices along their normal with layered 4D Perlin noise, then shades
//! each fragment as wire or fill from its barycentric coordinates and fades
//! it into the background with distance fog.
//!
//! # Architecture
//!
//! - **grid_renderer**: program setup, mesh upload and the draw call
//! - **frame**: per-frame parameters, camera path and matrices
//! - **color**: 0-255 to 0-1 color mapping
//! - **compositing** / **displacement**: CPU mirrors of the shader math,
//!   used by tests and the headless report
//! - **capture**: framebuffer readback for screenshots

pub mod capture;
pub mod color;
pub mod compositing;
pub mod displacement;
pub mod error;
pub mod frame;
pub mod grid_renderer;
pub mod shader_utils;

pub use capture::{capture_framebuffer, save_framebuffer};
pub use color::{map_color, map_range, to_rgb8};
pub use compositing::{Fragment, composite};
pub use displacement::{Displacer, z_range};
pub use error::RenderError;
pub use frame::{CameraPath, DrawParams, FrameMatrices, GridStyle, aspect_ratio};
pub use grid_renderer::{FRAGMENT_SHADER_SOURCE, GridRenderer, VERTEX_SHADER_SOURCE};

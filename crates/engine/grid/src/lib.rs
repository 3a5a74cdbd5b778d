//! Procedural planar grid meshes
//!
//! Builds the flat, subdivided rectangle that the wireframe renderer displaces
//! on the GPU:
//!
//! - [`Grid`]: indexed mesh (positions, static normals, UVs, triangle cells)
//! - [`WireframeMesh`]: per-triangle expansion carrying barycentric coordinates
//!   for solid-wireframe shading
//! - [`normalize_segment_count`]: floor-and-fallback coercion for segment inputs

pub mod error;
pub mod grid;
pub mod segments;
pub mod wireframe;

pub use error::{GridError, Result};
pub use grid::{Grid, GridBounds, STATIC_NORMAL};
pub use segments::normalize_segment_count;
pub use wireframe::{BARYCENTRIC_CORNERS, WireframeMesh};

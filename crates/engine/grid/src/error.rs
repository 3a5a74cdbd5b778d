//! Error types for grid generation

use thiserror::Error;

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while building a grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Segment count below zero
    #[error("Segment count must not be negative, got {0}")]
    NegativeSegmentCount(f64),

    /// Width or height is NaN or infinite
    #[error("Grid extent must be finite, got {width} x {height}")]
    InvalidExtent { width: f32, height: f32 },

    /// Vertex count does not fit 32-bit indices
    #[error("Grid of {width_segments} x {height_segments} segments exceeds the u32 index range")]
    TooManyVertices {
        width_segments: u32,
        height_segments: u32,
    },
}

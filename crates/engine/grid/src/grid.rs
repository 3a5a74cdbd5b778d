//! Indexed planar grid mesh
//!
//! The plane is centered on the origin in the XY plane, facing +Z. Vertices
//! are laid out column by column (`ix` outer, `iy` inner) while the cell
//! indices use a stride of `width_segments + 1` per `iy` row. For square
//! grids this walks every cell exactly once.

use glam::Vec3;

use crate::error::{GridError, Result};
use crate::segments::normalize_segment_count;

/// Normal shared by every vertex of the undisplaced plane
pub const STATIC_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Axis-aligned bounds of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl GridBounds {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Subdivided flat rectangle
///
/// Computed once at construction and immutable afterwards. Changing any
/// parameter means building a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    cells: Vec<u32>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::build(1.0, 1.0, 1, 1)
    }
}

impl Grid {
    /// Build a grid of the given extents and segment counts
    ///
    /// Zero segment counts fall back to one segment. Zero extents are legal
    /// and collapse the corresponding axis.
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        let width_segments = normalize_segment_count(Some(width_segments as f64))?;
        let height_segments = normalize_segment_count(Some(height_segments as f64))?;
        Self::checked(width, height, width_segments, height_segments)
    }

    /// Build a unit grid with the given segment counts
    pub fn with_segments(width_segments: u32, height_segments: u32) -> Result<Self> {
        Self::new(1.0, 1.0, width_segments, height_segments)
    }

    /// Build a grid from loosely typed segment inputs
    ///
    /// See [`normalize_segment_count`] for how missing, fractional and
    /// non-finite values are treated.
    pub fn from_raw(
        width: f32,
        height: f32,
        width_segments: Option<f64>,
        height_segments: Option<f64>,
    ) -> Result<Self> {
        let width_segments = normalize_segment_count(width_segments)?;
        let height_segments = normalize_segment_count(height_segments)?;
        Self::checked(width, height, width_segments, height_segments)
    }

    fn checked(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(GridError::InvalidExtent { width, height });
        }

        let vertex_count = (width_segments as u64 + 1) * (height_segments as u64 + 1);
        if vertex_count > u32::MAX as u64 {
            return Err(GridError::TooManyVertices {
                width_segments,
                height_segments,
            });
        }

        Ok(Self::build(width, height, width_segments, height_segments))
    }

    fn build(width: f32, height: f32, grid_x: u32, grid_y: u32) -> Self {
        let stride = grid_x + 1;
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;

        let vertex_count = (grid_x as usize + 1) * (grid_y as usize + 1);
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width / 2.0;

            for iy in 0..=grid_y {
                let y = iy as f32 * segment_height - height / 2.0;

                positions.push([x, -y, 0.0]);
                normals.push(STATIC_NORMAL);
                uvs.push([ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
            }
        }

        let mut cells = Vec::with_capacity(grid_x as usize * grid_y as usize * 6);
        for ix in 0..grid_x {
            for iy in 0..grid_y {
                let a = ix + stride * iy;
                let b = ix + stride * (iy + 1);
                let c = (ix + 1) + stride * (iy + 1);
                let d = (ix + 1) + stride * iy;

                cells.extend_from_slice(&[a, b, d]);
                cells.extend_from_slice(&[b, c, d]);
            }
        }

        tracing::debug!(
            "Generated {}x{} grid: {} vertices, {} triangles",
            grid_x,
            grid_y,
            positions.len(),
            cells.len() / 3
        );

        Self {
            width,
            height,
            width_segments: grid_x,
            height_segments: grid_y,
            positions,
            normals,
            uvs,
            cells,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Effective (normalized) segment count along X
    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    /// Effective (normalized) segment count along Y
    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Flat triangle index list, three indices per triangle
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Iterate the cells as index triples
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [u32; 3]> + '_ {
        self.cells.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.cells.len() / 3
    }

    /// Bounds of the undisplaced plane
    pub fn bounds(&self) -> GridBounds {
        let half = Vec3::new(self.width / 2.0, self.height / 2.0, 0.0);
        GridBounds {
            min: (-half).min(half),
            max: (-half).max(half),
        }
    }
}

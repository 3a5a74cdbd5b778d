//! Solid-wireframe expansion
//!
//! Barycentric wireframe shading needs every triangle corner to carry its own
//! barycentric coordinate, so shared vertices are split: each triangle gets
//! three private corners and the index buffer becomes `0..3 * triangles`.
//! Only two barycentric components are stored; the fragment shader derives
//! the third as `1 - x - y`.

use crate::grid::Grid;

/// Barycentric coordinates assigned to the corners of every triangle
pub const BARYCENTRIC_CORNERS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

/// Non-indexed grid with per-corner barycentric coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireframeMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub barycentric: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl WireframeMesh {
    /// Split every triangle of `grid` into three private corners
    pub fn from_grid(grid: &Grid) -> Self {
        let corner_count = grid.cells().len();
        let mut mesh = Self {
            positions: Vec::with_capacity(corner_count),
            normals: Vec::with_capacity(corner_count),
            uvs: Vec::with_capacity(corner_count),
            barycentric: Vec::with_capacity(corner_count),
            indices: Vec::with_capacity(corner_count),
        };

        for triangle in grid.triangles() {
            for (corner, &vertex) in triangle.iter().enumerate() {
                let vertex = vertex as usize;
                mesh.indices.push(mesh.positions.len() as u32);
                mesh.positions.push(grid.positions()[vertex]);
                mesh.normals.push(grid.normals()[vertex]);
                mesh.uvs.push(grid.uvs()[vertex]);
                mesh.barycentric.push(BARYCENTRIC_CORNERS[corner]);
            }
        }

        mesh
    }

    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl From<&Grid> for WireframeMesh {
    fn from(grid: &Grid) -> Self {
        Self::from_grid(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_expands_to_six_corners() {
        let grid = Grid::new(2.0, 2.0, 1, 1).unwrap();
        let mesh = WireframeMesh::from_grid(&grid);

        assert_eq!(mesh.corner_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_barycentric_pattern_repeats_per_triangle() {
        let grid = Grid::new(10.0, 10.0, 3, 3).unwrap();
        let mesh = WireframeMesh::from_grid(&grid);

        for (i, bary) in mesh.barycentric.iter().enumerate() {
            assert_eq!(*bary, BARYCENTRIC_CORNERS[i % 3]);
        }
    }
}

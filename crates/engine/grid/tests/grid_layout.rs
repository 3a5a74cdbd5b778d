//! Layout checks for generated grids

use grid::{BARYCENTRIC_CORNERS, Grid, GridError, STATIC_NORMAL, WireframeMesh};

#[test]
fn test_counts_and_index_ranges() {
    for (sx, sy) in [(1, 1), (2, 3), (10, 10), (7, 1), (40, 40)] {
        let grid = Grid::new(150.0, 100.0, sx, sy).unwrap();
        let vertex_count = ((sx + 1) * (sy + 1)) as usize;

        assert_eq!(grid.vertex_count(), vertex_count);
        assert_eq!(grid.normals().len(), vertex_count);
        assert_eq!(grid.uvs().len(), vertex_count);
        assert_eq!(grid.cells().len(), (6 * sx * sy) as usize);
        assert_eq!(grid.triangle_count(), (2 * sx * sy) as usize);
        assert!(
            grid.cells().iter().all(|&i| (i as usize) < vertex_count),
            "index out of range for {sx}x{sy}"
        );
    }
}

#[test]
fn test_all_normals_face_z() {
    let grid = Grid::new(150.0, 100.0, 12, 8).unwrap();
    assert!(grid.normals().iter().all(|n| *n == STATIC_NORMAL));
    assert_eq!(STATIC_NORMAL, [0.0, 0.0, 1.0]);
}

#[test]
fn test_unit_cell_positions() {
    let grid = Grid::new(2.0, 2.0, 1, 1).unwrap();

    // (ix, iy) = (0,0), (0,1), (1,0), (1,1)
    assert_eq!(
        grid.positions(),
        &[
            [-1.0, 1.0, 0.0],
            [-1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, -1.0, 0.0],
        ]
    );
}

#[test]
fn test_unit_cell_triangle_split() {
    let grid = Grid::new(2.0, 2.0, 1, 1).unwrap();

    // a = 0, b = 2, c = 3, d = 1 -> (a, b, d), (b, c, d)
    assert_eq!(grid.cells(), &[0, 2, 1, 2, 3, 1]);
    let triangles: Vec<[u32; 3]> = grid.triangles().collect();
    assert_eq!(triangles, vec![[0, 2, 1], [2, 3, 1]]);
}

#[test]
fn test_unit_cell_uvs() {
    let grid = Grid::new(2.0, 2.0, 1, 1).unwrap();
    assert_eq!(
        grid.uvs(),
        &[[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]]
    );
}

#[test]
fn test_wide_grid_uses_width_stride() {
    let grid = Grid::new(2.0, 1.0, 2, 1).unwrap();

    #[rustfmt::skip]
    let expected = [
        0, 3, 1,  3, 4, 1,
        1, 4, 2,  4, 5, 2,
    ];
    assert_eq!(grid.cells(), &expected);
}

#[test]
fn test_vertex_positions_follow_segment_spacing() {
    let grid = Grid::new(150.0, 100.0, 10, 4).unwrap();
    let rows = 5;

    // ix = 3, iy = 2
    let vertex = grid.positions()[3 * rows + 2];
    assert_eq!(vertex, [3.0 * 15.0 - 75.0, -(2.0 * 25.0 - 50.0), 0.0]);

    let uv = grid.uvs()[3 * rows + 2];
    assert!((uv[0] - 0.3).abs() < 1e-6);
    assert!((uv[1] - 0.5).abs() < 1e-6);
}

#[test]
fn test_raw_segment_inputs_normalize_to_one() {
    for raw in [Some(0.0), None, Some(f64::NAN)] {
        let grid = Grid::from_raw(1.0, 1.0, raw, raw).unwrap();
        assert_eq!(grid.width_segments(), 1);
        assert_eq!(grid.height_segments(), 1);
        assert_eq!(grid.vertex_count(), 4);
    }
}

#[test]
fn test_raw_negative_segments_are_rejected() {
    let err = Grid::from_raw(1.0, 1.0, Some(-2.0), Some(4.0)).unwrap_err();
    assert_eq!(err, GridError::NegativeSegmentCount(-2.0));
}

#[test]
fn test_wireframe_corners_copy_source_vertices() {
    let grid = Grid::new(150.0, 100.0, 4, 4).unwrap();
    let mesh = WireframeMesh::from(&grid);

    assert_eq!(mesh.corner_count(), grid.cells().len());
    assert_eq!(mesh.triangle_count(), grid.triangle_count());

    for (corner, &source) in grid.cells().iter().enumerate() {
        let source = source as usize;
        assert_eq!(mesh.positions[corner], grid.positions()[source]);
        assert_eq!(mesh.normals[corner], grid.normals()[source]);
        assert_eq!(mesh.uvs[corner], grid.uvs()[source]);
        assert_eq!(mesh.barycentric[corner], BARYCENTRIC_CORNERS[corner % 3]);
        assert_eq!(mesh.indices[corner] as usize, corner);
    }
}

//! CPU reference of the fragment-stage formulas in `shaders/grid.frag`
//!
//! Screen-space derivatives are not available off the GPU, so
//! [`grid_factor`] takes the `fwidth` of the barycentric vector as an
//! explicit argument.

use glam::{Vec2, Vec3};

use crate::frame::{DrawParams, GridStyle};

/// Interpolated inputs of a single fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Two stored barycentric components
    pub barycentric: Vec2,
    /// `fwidth` of the full three-component barycentric vector
    pub barycentric_fwidth: Vec3,
    /// Displaced vertex position
    pub displaced: Vec3,
    pub distance_from_eye: f32,
}

/// GLSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Edge weight: 0 on a triangle edge, 1 in the interior
pub fn grid_factor(barycentric: Vec2, fwidth: Vec3, width: f32, feather: f32) -> f32 {
    let w1 = width - feather * 0.5;
    let bary = Vec3::new(
        barycentric.x,
        barycentric.y,
        1.0 - barycentric.x - barycentric.y,
    );
    let a3 = Vec3::new(
        smoothstep(fwidth.x * w1, fwidth.x * (w1 + feather), bary.x),
        smoothstep(fwidth.y * w1, fwidth.y * (w1 + feather), bary.y),
        smoothstep(fwidth.z * w1, fwidth.z * (w1 + feather), bary.z),
    );
    a3.min_element()
}

/// Line color after the depth-driven darkening or brightening
pub fn wire_color(
    background: Vec3,
    mesh: Vec3,
    displaced_z: f32,
    inverse: bool,
    same_as_background: bool,
) -> Vec3 {
    let base = if same_as_background { background } else { mesh };
    let lifted = base * (displaced_z * 10.0);

    if inverse {
        base * background.lerp(lifted, displaced_z)
    } else {
        base * lifted.lerp(background, displaced_z)
    }
}

/// Linear fog weight: 1 keeps the grid color, 0 is pure background
pub fn fog_factor(distance: f32, fog_distance: Vec2) -> f32 {
    let (near, far) = (fog_distance.x, fog_distance.y);
    ((far - distance) / far - near).clamp(0.0, 1.0)
}

/// Final fragment color
pub fn composite(fragment: &Fragment, params: &DrawParams, style: &GridStyle) -> Vec3 {
    let wire = wire_color(
        params.background_color,
        params.mesh_color,
        fragment.displaced.z,
        params.inverse,
        params.same_as_background,
    );

    let edge = grid_factor(
        fragment.barycentric,
        fragment.barycentric_fwidth,
        params.line_thickness,
        style.line_feather,
    );
    let final_grid = wire.lerp(params.background_color, edge);

    let fog = fog_factor(fragment.distance_from_eye, style.fog_distance);
    params.background_color.lerp(final_grid, fog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIN: Vec3 = Vec3::splat(0.01);

    #[test]
    fn test_smoothstep_matches_glsl() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
    }

    #[test]
    fn test_grid_factor_edge_and_interior() {
        // On the edge opposite the first corner
        assert_eq!(grid_factor(Vec2::new(0.0, 0.5), THIN, 0.5, 0.5), 0.0);
        // Triangle centroid, far from every edge
        let center = Vec2::splat(1.0 / 3.0);
        assert_eq!(grid_factor(center, THIN, 0.5, 0.5), 1.0);
    }

    #[test]
    fn test_thicker_lines_cover_more() {
        let near_edge = Vec2::new(0.02, 0.49);
        let thin = grid_factor(near_edge, THIN, 0.5, 0.5);
        let thick = grid_factor(near_edge, THIN, 3.5, 0.5);
        assert!(thick < thin);
    }

    #[test]
    fn test_fog_factor_range() {
        let fog = Vec2::new(0.0, 140.0);
        assert_eq!(fog_factor(0.0, fog), 1.0);
        assert_eq!(fog_factor(70.0, fog), 0.5);
        assert_eq!(fog_factor(140.0, fog), 0.0);
        assert_eq!(fog_factor(500.0, fog), 0.0);
    }

    #[test]
    fn test_fog_near_offset_dims_everything() {
        let fog = Vec2::new(0.5, 100.0);
        assert_eq!(fog_factor(0.0, fog), 0.5);
        assert_eq!(fog_factor(60.0, fog), 0.0);
    }

    #[test]
    fn test_wire_color_at_rest_plane() {
        let background = Vec3::new(0.0, 0.0, 0.2);
        let mesh = Vec3::new(0.6, 0.1, 0.6);

        // z = 0 keeps the first mix operand
        assert_eq!(wire_color(background, mesh, 0.0, true, false), mesh * background);
        assert_eq!(wire_color(background, mesh, 0.0, false, false), Vec3::ZERO);
        assert_eq!(
            wire_color(background, mesh, 0.0, true, true),
            background * background
        );
    }

    #[test]
    fn test_composite_fully_fogged_is_background() {
        let params = DrawParams::default();
        let style = GridStyle::default();
        let fragment = Fragment {
            barycentric: Vec2::new(0.0, 0.5),
            barycentric_fwidth: THIN,
            displaced: Vec3::new(0.0, 0.0, 0.3),
            distance_from_eye: 1000.0,
        };
        assert_eq!(composite(&fragment, &params, &style), params.background_color);
    }

    #[test]
    fn test_composite_interior_is_background() {
        let params = DrawParams::default();
        let style = GridStyle::default();
        let fragment = Fragment {
            barycentric: Vec2::splat(1.0 / 3.0),
            barycentric_fwidth: THIN,
            displaced: Vec3::new(0.0, 0.0, 0.3),
            distance_from_eye: 10.0,
        };
        let color = composite(&fragment, &params, &style);
        assert!((color - params.background_color).length() < 1e-6);
    }

    #[test]
    fn test_composite_edge_shows_wire() {
        let params = DrawParams::default();
        let style = GridStyle::default();
        let fragment = Fragment {
            barycentric: Vec2::new(0.0, 0.5),
            barycentric_fwidth: THIN,
            displaced: Vec3::new(0.0, 0.0, 0.3),
            distance_from_eye: 0.0,
        };
        let expected = wire_color(
            params.background_color,
            params.mesh_color,
            0.3,
            params.inverse,
            params.same_as_background,
        );
        let color = composite(&fragment, &params, &style);
        assert!((color - expected).length() < 1e-6);
    }
}

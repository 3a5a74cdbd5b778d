//! Grid built from the application location
//!
//! A scene is never edited in place. Changing the size preset rewrites the
//! location and loads a fresh scene from it.

use std::fmt;

use grid::{Grid, GridError};
use renderer::{Displacer, z_range};

use crate::config::WireframeConfig;
use crate::size::GridSize;

pub struct Scene {
    pub location: String,
    pub size: GridSize,
    pub grid: Grid,
}

impl Scene {
    pub fn load(location: &str, config: &WireframeConfig) -> Result<Self, GridError> {
        let size = GridSize::from_location(location);
        let segments = size.segments();
        let grid = Grid::new(config.grid.width, config.grid.height, segments, segments)?;

        tracing::info!(
            "Loaded {} scene from {} ({} vertices)",
            size,
            location,
            grid.vertex_count()
        );

        Ok(Self {
            location: location.to_string(),
            size,
            grid,
        })
    }

    /// Location that reloads this scene with another preset
    pub fn location_for(&self, size: GridSize) -> String {
        size.apply_to_location(&self.location)
    }

    pub fn report(&self, config: &WireframeConfig) -> SceneReport {
        let displacer = Displacer::perlin(config.style.noise_offset);
        let displaced = displacer.displace_grid(&self.grid, 0.0, config.params.displacement);

        SceneReport {
            location: self.location.clone(),
            size: self.size,
            vertices: self.grid.vertex_count(),
            triangles: self.grid.triangle_count(),
            bounds: self.grid.bounds(),
            displaced_z: z_range(&displaced),
        }
    }
}

/// Statistics logged by `--headless`
#[derive(Debug, Clone, PartialEq)]
pub struct SceneReport {
    pub location: String,
    pub size: GridSize,
    pub vertices: usize,
    pub triangles: usize,
    pub bounds: grid::GridBounds,
    /// Z range after displacement at t = 0
    pub displaced_z: Option<(f32, f32)>,
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "location:  {}", self.location)?;
        writeln!(
            f,
            "size:      {} ({} segments)",
            self.size,
            self.size.segments()
        )?;
        writeln!(f, "vertices:  {}", self.vertices)?;
        writeln!(f, "triangles: {}", self.triangles)?;
        writeln!(
            f,
            "bounds:    [{:.1}, {:.1}] .. [{:.1}, {:.1}]",
            self.bounds.min.x, self.bounds.min.y, self.bounds.max.x, self.bounds.max.y
        )?;
        match self.displaced_z {
            Some((lo, hi)) => write!(f, "z range:   {:.3} .. {:.3}", lo, hi),
            None => write!(f, "z range:   empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_location_size() {
        let config = WireframeConfig::default();
        let scene = Scene::load("wireframe://grid?size=small", &config).unwrap();
        assert_eq!(scene.size, GridSize::Small);
        assert_eq!(scene.grid.width_segments(), 10);
        assert_eq!(scene.grid.height_segments(), 10);
        assert_eq!(scene.grid.width(), 150.0);
        assert_eq!(scene.grid.height(), 100.0);
    }

    #[test]
    fn test_load_defaults_to_big() {
        let scene = Scene::load("wireframe://grid", &WireframeConfig::default()).unwrap();
        assert_eq!(scene.size, GridSize::Big);
        assert_eq!(scene.grid.vertex_count(), 161 * 161);
    }

    #[test]
    fn test_location_for_reload() {
        let scene = Scene::load("wireframe://grid?size=small", &WireframeConfig::default()).unwrap();
        let location = scene.location_for(GridSize::Medium);
        assert_eq!(location, "wireframe://grid?size=medium");

        let reloaded = Scene::load(&location, &WireframeConfig::default()).unwrap();
        assert_eq!(reloaded.grid.width_segments(), 40);
    }

    #[test]
    fn test_report() {
        let config = WireframeConfig::default();
        let scene = Scene::load("wireframe://grid?size=small", &config).unwrap();
        let report = scene.report(&config);
        assert_eq!(report.vertices, 121);
        assert_eq!(report.triangles, 200);
        assert_eq!(report.bounds.size().x, 150.0);
        assert!(report.displaced_z.is_some());
        assert!(report.to_string().contains("triangles: 200"));
    }
}

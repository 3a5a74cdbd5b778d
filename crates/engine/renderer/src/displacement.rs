//! CPU reference of the vertex displacement in `shaders/grid.vert`
//!
//! The shader embeds its own classic-noise primitive; here any 4D
//! [`NoiseFn`] can stand in, with [`Perlin`] as the default. Values match the
//! GPU in shape, not bit for bit.

use glam::Vec3;
use grid::Grid;
use noise::{NoiseFn, Perlin};

/// Scale applied to positions for the low-frequency modulation sample
pub const MODULATION_FREQUENCY: f32 = 0.05;

/// Displaces grid vertices along their normals
pub struct Displacer<N = Perlin> {
    noise: N,
    /// Fourth coordinate of the modulation sample
    pub noise_offset: f32,
}

impl Default for Displacer<Perlin> {
    fn default() -> Self {
        Self::perlin(100.0)
    }
}

impl Displacer<Perlin> {
    /// Displacer over default-seeded Perlin noise
    pub fn perlin(noise_offset: f32) -> Self {
        Self::new(Perlin::default(), noise_offset)
    }
}

impl<N: NoiseFn<f64, 4>> Displacer<N> {
    pub fn new(noise: N, noise_offset: f32) -> Self {
        Self {
            noise,
            noise_offset,
        }
    }

    fn sample(&self, p: Vec3, w: f32) -> f32 {
        self.noise.get([p.x as f64, p.y as f64, p.z as f64, w as f64]) as f32
    }

    /// Displace one vertex at animation time `time`
    pub fn displace(&self, position: Vec3, normal: Vec3, time: f32, scale: f32) -> Vec3 {
        let modulation = self.sample(
            MODULATION_FREQUENCY * position + Vec3::splat(time),
            self.noise_offset,
        );
        let detail = self.sample(position, time);
        position + normal * scale * detail * modulation
    }

    /// Displace every vertex of `grid`, keeping vertex order
    pub fn displace_grid(&self, grid: &Grid, time: f32, scale: f32) -> Vec<Vec3> {
        grid.positions()
            .iter()
            .zip(grid.normals())
            .map(|(&p, &n)| self.displace(Vec3::from(p), Vec3::from(n), time, scale))
            .collect()
    }
}

/// Smallest and largest Z among `positions`, or `None` when empty
pub fn z_range(positions: &[Vec3]) -> Option<(f32, f32)> {
    positions.iter().fold(None, |range, p| match range {
        None => Some((p.z, p.z)),
        Some((lo, hi)) => Some((lo.min(p.z), hi.max(p.z))),
    })
}

//! Per-frame draw parameters and matrix math
//!
//! Everything the grid program needs for one frame is gathered into plain
//! structs up front. Matrices are pure functions of the eye position and
//! viewport aspect ratio.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_4;

/// Vertical field of view in radians
pub const FIELD_OF_VIEW: f32 = FRAC_PI_4;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 1000.0;
/// Tilt applied to the grid around the X axis, in degrees
pub const TILT_DEGREES: f32 = 70.0;

/// Uniforms fixed when the scene is set up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Fog range as `(near, far)`
    pub fog_distance: Vec2,
    /// Anti-aliasing width of the wireframe edge
    pub line_feather: f32,
    /// Fourth coordinate of the low-frequency noise sample
    pub noise_offset: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            fog_distance: Vec2::new(0.0, 140.0),
            line_feather: 0.5,
            noise_offset: 100.0,
        }
    }
}

/// Path the eye follows around the grid over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPath {
    pub radius_x: f32,
    pub amplitude_y: f32,
    pub depth: f32,
    /// Scale from elapsed seconds to the animation clock
    pub speed: f32,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self {
            radius_x: 40.0,
            amplitude_y: 5.0,
            depth: -70.0,
            speed: 0.5,
        }
    }
}

impl CameraPath {
    /// Eye position after `elapsed` seconds
    pub fn eye_at(&self, elapsed: f32) -> Vec3 {
        Vec3::new(
            self.radius_x * (elapsed * self.speed).cos(),
            self.amplitude_y * elapsed.sin(),
            self.depth,
        )
    }

    /// Animation clock handed to the noise functions
    pub fn shader_time(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }
}

/// Per-frame snapshot consumed by [`crate::GridRenderer::render`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub time: f32,
    pub eye: Vec3,
    /// 0-1 RGB
    pub background_color: Vec3,
    /// 0-1 RGB
    pub mesh_color: Vec3,
    pub displacement: f32,
    pub line_thickness: f32,
    pub inverse: bool,
    pub same_as_background: bool,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            time: 0.0,
            eye: CameraPath::default().eye_at(0.0),
            background_color: Vec3::new(0.0, 0.0, 0.2),
            mesh_color: Vec3::new(0.6, 0.1, 0.6),
            displacement: 6.0,
            line_thickness: 0.5,
            inverse: true,
            same_as_background: false,
        }
    }
}

/// Projection, view and model rotation for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: Mat4,
    pub view: Mat4,
    pub rotate: Mat4,
}

impl FrameMatrices {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            projection: projection_matrix(aspect),
            view: view_matrix(eye),
            rotate: rotation_matrix(),
        }
    }

    /// Full transform applied to an undisplaced grid vertex
    pub fn clip_from_model(&self) -> Mat4 {
        self.projection * self.view * self.rotate
    }
}

/// Width over height, falling back to 1 for an empty viewport
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Perspective projection in GL clip space
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FIELD_OF_VIEW, aspect, NEAR_PLANE, FAR_PLANE)
}

/// Look from `eye` at the origin with +Y up
pub fn view_matrix(eye: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
}

pub fn rotation_matrix() -> Mat4 {
    Mat4::from_rotation_x(TILT_DEGREES.to_radians())
}

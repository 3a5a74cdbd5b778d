//! Panel parameters
//!
//! [`Params`] is an immutable snapshot. The panel reports edits as
//! [`ParamsUpdate`] values and the app swaps in `params.apply(update)`; the
//! render loop reads whatever snapshot is current when a frame starts.

use std::ops::RangeInclusive;

use renderer::{CameraPath, DrawParams, map_color};

pub const DISPLACEMENT_RANGE: RangeInclusive<f32> = 1.0..=20.0;
pub const LINE_THICKNESS_RANGE: RangeInclusive<f32> = 0.1..=3.5;

/// User-tunable look of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// 8-bit RGB
    pub background_color: [u8; 3],
    /// 8-bit RGB
    pub mesh_color: [u8; 3],
    pub displacement: f32,
    pub line_thickness: f32,
    pub same_as_background: bool,
    pub inverse: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            background_color: [0, 0, 51],
            mesh_color: [153, 25, 153],
            displacement: 6.0,
            line_thickness: 0.5,
            same_as_background: false,
            inverse: true,
        }
    }
}

/// A single edit coming from the panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamsUpdate {
    BackgroundColor([u8; 3]),
    MeshColor([u8; 3]),
    Displacement(f32),
    LineThickness(f32),
    SameAsBackground(bool),
    Inverse(bool),
}

impl Params {
    /// New snapshot with `update` applied, clamped into the panel ranges
    ///
    /// NaN slider values are ignored.
    pub fn apply(self, update: ParamsUpdate) -> Params {
        match update {
            ParamsUpdate::BackgroundColor(rgb) => Params {
                background_color: rgb,
                ..self
            },
            ParamsUpdate::MeshColor(rgb) => Params {
                mesh_color: rgb,
                ..self
            },
            ParamsUpdate::Displacement(value) => Params {
                displacement: clamp_to(value, &DISPLACEMENT_RANGE, self.displacement),
                ..self
            },
            ParamsUpdate::LineThickness(value) => Params {
                line_thickness: clamp_to(value, &LINE_THICKNESS_RANGE, self.line_thickness),
                ..self
            },
            ParamsUpdate::SameAsBackground(same_as_background) => Params {
                same_as_background,
                ..self
            },
            ParamsUpdate::Inverse(inverse) => Params { inverse, ..self },
        }
    }

    /// Apply a batch of edits in order
    pub fn apply_all(self, updates: impl IntoIterator<Item = ParamsUpdate>) -> Params {
        updates.into_iter().fold(self, Params::apply)
    }

    /// Uniform values for the frame `elapsed` seconds into the animation
    pub fn draw_params(&self, elapsed: f32, camera: &CameraPath) -> DrawParams {
        DrawParams {
            time: camera.shader_time(elapsed),
            eye: camera.eye_at(elapsed),
            background_color: map_color(self.background_color),
            mesh_color: map_color(self.mesh_color),
            displacement: self.displacement,
            line_thickness: self.line_thickness,
            inverse: self.inverse,
            same_as_background: self.same_as_background,
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

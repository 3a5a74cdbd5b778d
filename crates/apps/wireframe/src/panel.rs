//! Parameter panel
//!
//! The panel never mutates app state. It reads the current snapshot, draws
//! widgets over local copies and reports what changed.

use crate::params::{DISPLACEMENT_RANGE, LINE_THICKNESS_RANGE, Params, ParamsUpdate};
use crate::size::GridSize;

/// Edits made in the panel during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelOutput {
    pub updates: Vec<ParamsUpdate>,
    /// New preset; the scene must be reloaded to apply it
    pub size: Option<GridSize>,
}

impl PanelOutput {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.size.is_none()
    }
}

/// Read-only info shown at the top of the panel
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub triangles: usize,
}

/// Render the panel for `params` and collect the user's edits
pub fn show_panel(
    ctx: &egui::Context,
    params: &Params,
    size: GridSize,
    stats: PanelStats,
) -> PanelOutput {
    let mut output = PanelOutput::default();

    egui::SidePanel::right("controls").show(ctx, |ui| {
        ui.heading("Wireframe");
        ui.label(format!("FPS: {:.1}", stats.fps));
        ui.label(format!("Triangles: {}", stats.triangles));

        ui.separator();
        let mut selected = size;
        egui::ComboBox::from_label("size")
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                for option in GridSize::ALL {
                    ui.selectable_value(&mut selected, option, option.as_str());
                }
            });
        if selected != size {
            output.size = Some(selected);
        }

        ui.separator();
        let mut background = params.background_color;
        ui.horizontal(|ui| {
            if ui.color_edit_button_srgb(&mut background).changed() {
                output.updates.push(ParamsUpdate::BackgroundColor(background));
            }
            ui.label("background");
        });

        let mut mesh = params.mesh_color;
        ui.horizontal(|ui| {
            if ui.color_edit_button_srgb(&mut mesh).changed() {
                output.updates.push(ParamsUpdate::MeshColor(mesh));
            }
            ui.label("mesh");
        });

        let mut displacement = params.displacement;
        if ui
            .add(egui::Slider::new(&mut displacement, DISPLACEMENT_RANGE).text("displacement"))
            .changed()
        {
            output.updates.push(ParamsUpdate::Displacement(displacement));
        }

        let mut line_thickness = params.line_thickness;
        if ui
            .add(egui::Slider::new(&mut line_thickness, LINE_THICKNESS_RANGE).text("line thickness"))
            .changed()
        {
            output.updates.push(ParamsUpdate::LineThickness(line_thickness));
        }

        let mut inverse = params.inverse;
        if ui.checkbox(&mut inverse, "inverse").changed() {
            output.updates.push(ParamsUpdate::Inverse(inverse));
        }

        let mut same_as_background = params.same_as_background;
        if ui
            .checkbox(&mut same_as_background, "same as background")
            .changed()
        {
            output
                .updates
                .push(ParamsUpdate::SameAsBackground(same_as_background));
        }
    });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame_reports_nothing() {
        let ctx = egui::Context::default();
        let mut output = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            output = Some(show_panel(
                ctx,
                &Params::default(),
                GridSize::Big,
                PanelStats::default(),
            ));
        });
        assert_eq!(output, Some(PanelOutput::default()));
    }

    #[test]
    fn test_output_is_empty() {
        assert!(PanelOutput::default().is_empty());
        let output = PanelOutput {
            updates: Vec::new(),
            size: Some(GridSize::Small),
        };
        assert!(!output.is_empty());
    }
}

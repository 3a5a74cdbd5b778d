//! egui on top of the app's glow context

use egui::Context as EguiContext;
use egui_glow::Painter;
use egui_winit::State as EguiState;
use glow::Context;
use std::sync::Arc;
use winit::window::Window;

/// egui context, winit input state and glow painter for one window
pub struct EguiIntegration {
    pub ctx: EguiContext,
    state: EguiState,
    painter: Painter,
}

impl EguiIntegration {
    /// # Safety
    /// The GL context must be current when this is called.
    pub unsafe fn new(window: &Window, gl: Arc<Context>) -> anyhow::Result<Self> {
        let ctx = EguiContext::default();
        let state = EguiState::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            None,
            None,
            None,
        );
        let painter = Painter::new(gl, "", None, false)
            .map_err(|e| anyhow::anyhow!("Failed to create egui painter: {}", e))?;

        Ok(Self {
            ctx,
            state,
            painter,
        })
    }

    /// Returns true if egui consumed the event
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run `run_ui` for one frame and paint the result over the current framebuffer
    pub fn run(&mut self, window: &Window, size: [u32; 2], run_ui: impl FnMut(&EguiContext)) {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, run_ui);

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.painter.paint_and_update_textures(
            size,
            full_output.pixels_per_point,
            &clipped_primitives,
            &full_output.textures_delta,
        );
    }
}

impl Drop for EguiIntegration {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

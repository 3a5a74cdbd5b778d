//! Window, GL context and frame loop
//!
//! Everything runs on the event-loop thread. Each `RedrawRequested` reads
//! the current [`Params`] snapshot, draws the grid, runs the panel and
//! swaps in whatever edits the panel reported for the next frame.

use anyhow::{Context as _, anyhow};
use glow::Context;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

#[cfg(target_os = "linux")]
use winit::platform::x11::EventLoopBuilderExtX11;

use renderer::{CameraPath, GridRenderer, GridStyle, save_framebuffer};

use crate::cli::FrameLimit;
use crate::config::WireframeConfig;
use crate::egui_integration::EguiIntegration;
use crate::panel::{PanelOutput, PanelStats, show_panel};
use crate::params::Params;
use crate::scene::Scene;
use crate::size::GridSize;

/// GL objects that only exist while the window does
struct GlState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl: Arc<Context>,
    egui: EguiIntegration,
}

enum FrameOutcome {
    Continue,
    Exit,
}

pub struct WireframeApp {
    config: WireframeConfig,
    style: GridStyle,
    camera: CameraPath,
    params: Params,
    scene: Scene,
    frame_limit: Option<FrameLimit>,

    gl_state: Option<GlState>,
    renderer: GridRenderer,

    start_time: Instant,
    last_frame: Instant,
    fps: f32,
    frame_count: u64,
    pending_size: Option<GridSize>,

    /// First fatal error seen inside the event loop
    error: Option<anyhow::Error>,
}

impl WireframeApp {
    pub fn new(
        config: WireframeConfig,
        location: &str,
        frame_limit: Option<FrameLimit>,
    ) -> anyhow::Result<Self> {
        let scene = Scene::load(location, &config)
            .with_context(|| format!("Failed to build grid for {}", location))?;

        if let Some(limit) = &frame_limit {
            tracing::info!("Rendering {} frame(s) then exiting", limit.frames);
        }

        Ok(Self {
            style: config.grid_style(),
            camera: config.camera_path(),
            params: config.initial_params(),
            config,
            scene,
            frame_limit,
            gl_state: None,
            renderer: GridRenderer::new(),
            start_time: Instant::now(),
            last_frame: Instant::now(),
            fps: 0.0,
            frame_count: 0,
            pending_size: None,
            error: None,
        })
    }

    /// Current panel snapshot
    pub fn params(&self) -> Params {
        self.params
    }

    /// Consume the app after the event loop returns, surfacing any fatal error
    pub fn finish(self) -> anyhow::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn init_gl(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.window_title())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_transparency(false);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("glutin offers at least one config")
            })
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let window = window.ok_or_else(|| anyhow!("Display builder returned no window"))?;
        let window_handle = window
            .window_handle()
            .context("Window has no native handle")?
            .as_raw();
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(Some(window_handle));

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Failed to create GLES 3.0 context")?
        };

        let size = window.inner_size();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("Failed to create window surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make GL context current")?;

        let gl = Arc::new(unsafe {
            Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s))
        });
        tracing::info!("OpenGL context created ({}x{})", size.width, size.height);

        unsafe {
            self.renderer.init_gl(&gl)?;
            self.renderer.upload(&gl, &self.scene.grid)?;
        }

        let egui = unsafe { EguiIntegration::new(&window, Arc::clone(&gl))? };

        self.gl_state = Some(GlState {
            window,
            gl_context,
            gl_surface,
            gl,
            egui,
        });
        self.start_time = Instant::now();
        self.last_frame = Instant::now();
        Ok(())
    }

    fn window_title(&self) -> String {
        format!("{} - {}", self.config.window.title, self.scene.location)
    }

    /// Replace the scene with one loaded from the location for `size`
    fn reload(&mut self, size: GridSize) -> anyhow::Result<()> {
        let location = self.scene.location_for(size);
        tracing::info!("Reloading scene: {}", location);

        self.scene = Scene::load(&location, &self.config)
            .with_context(|| format!("Failed to build grid for {}", location))?;

        if let Some(state) = &self.gl_state {
            unsafe { self.renderer.upload(&state.gl, &self.scene.grid)? };
            state.window.set_title(&self.window_title());
        }
        Ok(())
    }

    fn redraw(&mut self) -> anyhow::Result<FrameOutcome> {
        if let Some(size) = self.pending_size.take() {
            self.reload(size)?;
        }

        let Some(state) = self.gl_state.as_mut() else {
            return Ok(FrameOutcome::Continue);
        };

        let now = Instant::now();
        let delta = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        if delta > 0.0 {
            // Exponential smoothing keeps the readout legible
            self.fps = self.fps * 0.9 + (1.0 / delta) * 0.1;
        }
        let elapsed = (now - self.start_time).as_secs_f32();

        let size = state.window.inner_size();
        let draw = self.params.draw_params(elapsed, &self.camera);

        unsafe {
            GridRenderer::clear(&state.gl, &draw);
            self.renderer
                .render(&state.gl, &draw, &self.style, size.width, size.height)?;
        }

        let params = self.params;
        let grid_size = self.scene.size;
        let stats = PanelStats {
            fps: self.fps,
            triangles: self.scene.grid.triangle_count(),
        };
        let mut output = PanelOutput::default();
        state
            .egui
            .run(&state.window, [size.width, size.height], |ctx| {
                output = show_panel(ctx, &params, grid_size, stats);
            });

        if !output.is_empty() {
            tracing::debug!("Panel edits: {:?}", output);
        }
        self.params = params.apply_all(output.updates);
        if output.size.is_some() {
            self.pending_size = output.size;
        }

        self.frame_count += 1;
        let mut outcome = FrameOutcome::Continue;
        if let Some(limit) = &self.frame_limit
            && self.frame_count >= limit.frames
        {
            if let Some(path) = &limit.screenshot {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                unsafe { save_framebuffer(&state.gl, size.width, size.height, path)? };
            }
            tracing::info!("Rendered {} frame(s), exiting", self.frame_count);
            outcome = FrameOutcome::Exit;
        }

        state
            .gl_surface
            .swap_buffers(&state.gl_context)
            .context("Failed to swap buffers")?;

        Ok(outcome)
    }

    fn shutdown(&mut self) {
        if let Some(state) = self.gl_state.take() {
            unsafe { self.renderer.destroy_gl(&state.gl) };
            // Dropping the state destroys the egui painter while the context is current
            drop(state);
            tracing::info!("GL resources released");
        }
    }
}

impl ApplicationHandler for WireframeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_state.is_some() {
            return;
        }
        if let Err(e) = self.init_gl(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(state) = self.gl_state.as_mut() {
            let consumed = state.egui.on_window_event(&state.window, &event);
            if consumed && !matches!(event, WindowEvent::RedrawRequested) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let (Some(state), Some(width), Some(height)) = (
                    self.gl_state.as_ref(),
                    NonZeroU32::new(size.width),
                    NonZeroU32::new(size.height),
                ) {
                    state.gl_surface.resize(&state.gl_context, width, height);
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(FrameOutcome::Continue) => {
                    if let Some(state) = &self.gl_state {
                        state.window.request_redraw();
                    }
                }
                Ok(FrameOutcome::Exit) => event_loop.exit(),
                Err(e) => self.fail(event_loop, e),
            },
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.gl_state {
            state.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Create the event loop, forcing X11 on Linux
pub fn create_event_loop() -> anyhow::Result<EventLoop<()>> {
    #[cfg(target_os = "linux")]
    {
        let mut builder = EventLoop::builder();
        builder.with_x11();
        Ok(builder.build()?)
    }

    #[cfg(not(target_os = "linux"))]
    {
        Ok(EventLoop::new()?)
    }
}

/// Open the window and run until closed or the frame limit is reached
pub fn run(
    config: WireframeConfig,
    location: &str,
    frame_limit: Option<FrameLimit>,
) -> anyhow::Result<()> {
    let event_loop = create_event_loop()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = WireframeApp::new(config, location, frame_limit)?;
    event_loop.run_app(&mut app)?;
    app.finish()
}

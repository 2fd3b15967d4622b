//! The winit host: one window, one renderer, one simulation step per frame.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::{RenderError, RunError};
use crate::gpu::GpuRenderer;
use crate::input::{ControlPanel, PointerInput};
use crate::render::{Presenter, RenderTarget};
use crate::simulation::{FrameInput, SwarmState};
use crate::time::FrameTimer;

const WINDOW_TITLE: &str = "swarm";

struct App {
    state: SwarmState,
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    presenter: Presenter,
    pointer: PointerInput,
    panel: ControlPanel,
    pending: FrameInput,
    timer: FrameTimer,
    error: Option<RunError>,
}

impl App {
    fn new(state: SwarmState) -> Self {
        let panel = ControlPanel::new(*state.config());
        Self {
            state,
            window: None,
            renderer: None,
            presenter: Presenter::new(),
            pointer: PointerInput::default(),
            panel,
            pending: FrameInput::default(),
            timer: FrameTimer::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        tracing::error!(target: "swarm::window", %error, "shutting down");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = std::mem::take(&mut self.pending);
        self.state.tick(&input);

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match self.presenter.present(&mut self.state, renderer) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => renderer.reconfigure(),
            Err(RenderError::Timeout) => {
                tracing::warn!(target: "swarm::window", "frame acquire timed out, skipping");
            }
            Err(e @ RenderError::OutOfMemory) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        self.timer.tick();
        if self.timer.fps_updated() {
            let fps = self.timer.fps();
            tracing::debug!(target: "swarm::window", fps, frame = self.timer.frame(), "frame rate");
            if let Some(window) = &self.window {
                window.set_title(&format!("{WINDOW_TITLE} - {fps:.0} fps"));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        self.pointer.set_window_size(size.width, size.height);
        self.pending.viewport = Some((size.width, size.height));
        self.window = Some(window.clone());

        match pollster::block_on(GpuRenderer::new(window.clone())) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.presenter.invalidate();
                window.request_redraw();
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(config) = self.panel.handle_event(&event) {
            self.pending.reconfigure = Some(config);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                let (width, height) = (physical_size.width, physical_size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(width, height);
                }
                self.pointer.set_window_size(width, height);
                if width > 0 && height > 0 {
                    self.pending.viewport = Some((width, height));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(ndc) = self.pointer.cursor_moved(position.x as f32, position.y as f32) {
                    self.pending.pointer = Some(ndc);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Run `state` in a window until it is closed.
pub(crate) fn run(state: SwarmState) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(state);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

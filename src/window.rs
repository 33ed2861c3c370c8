//! `Window` is the core entity of every application.
//!
//! It owns the OS event loop, the renderer, and the per-frame callback, and
//! drives continuous redraws until the window is closed.

use std::sync::Arc;

use log::error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::render::Renderer;
use crate::scene::Scene;

/// Builds new [`Window`] with desired parameters.
#[derive(Clone, Debug)]
pub struct Builder {
    title: String,
    dimensions: (u32, u32),
}

impl Builder {
    /// Set the size of the viewport in logical pixels. Defaults to 1024x768.
    pub fn dimensions(&mut self, width: u32, height: u32) -> &mut Self {
        self.dimensions = (width.max(1), height.max(1));
        self
    }

    /// Create a window with the desired parameters.
    pub fn build(&mut self) -> Window {
        Window {
            title: self.title.clone(),
            dimensions: self.dimensions,
        }
    }
}

/// An OS window paired with a renderer.
pub struct Window {
    title: String,
    dimensions: (u32, u32),
}

impl Window {
    /// Creates a builder to customize window parameters.
    pub fn builder<T: Into<String>>(title: T) -> Builder {
        Builder {
            title: title.into(),
            dimensions: (1024, 768),
        }
    }

    /// Creates a window with the default parameters.
    pub fn new<T: Into<String>>(title: T) -> Window {
        Window::builder(title).build()
    }

    /// Opens the window and renders `scene` from `camera` until the window
    /// is closed, invoking `on_frame` before every draw.
    ///
    /// Blocks for the lifetime of the window. Fails if the event loop, the
    /// window, or the GPU device cannot be set up, or if rendering hits a
    /// fatal error later on.
    pub fn run<F>(self, scene: Scene, camera: Camera, on_frame: F) -> Result<()>
    where
        F: FnMut(&mut Scene, &Input) + 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            title: self.title,
            dimensions: self.dimensions,
            scene,
            camera,
            on_frame: Box::new(on_frame),
            window: None,
            renderer: None,
            input: Input::new(self.dimensions.0 as f32, self.dimensions.1 as f32),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    title: String,
    dimensions: (u32, u32),
    scene: Scene,
    camera: Camera,
    on_frame: Box<dyn FnMut(&mut Scene, &Input)>,
    window: Option<Arc<winit::window::Window>>,
    renderer: Option<Renderer>,
    input: Input,
    error: Option<Error>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = winit::window::Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.dimensions.0, self.dimensions.1));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let size = window.inner_size();
        self.input.set_window_size(size.width as f32, size.height as f32);

        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(err) => return self.fail(event_loop, err),
        }
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.input.set_window_size(width as f32, height as f32);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                self.input.tick();
                (self.on_frame)(&mut self.scene, &self.input);
                self.input.reset_deltas();
                if let Err(err) = renderer.render(&mut self.scene, &self.camera) {
                    self.fail(event_loop, err);
                }
            }
            other => self.input.window_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

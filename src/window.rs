use crate::config::WindowConfig;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::info;
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32};
use thiserror::Error;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create GL display: {0}")]
    Display(String),
    #[error("Failed to create window")]
    WindowCreation,
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
}

/// A window with a current OpenGL 3.3 core context and loaded function
/// pointers.
///
/// Owns the event loop callbacks: resizing, the Escape/close exit path and
/// buffer swapping all live here, so the demos only supply a per-frame draw
/// closure. All GL calls must stay on the thread that created this.
pub struct DemoWindow {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    clear_color: [f32; 4],
}

impl DemoWindow {
    pub fn new(config: &WindowConfig) -> Result<(Self, EventLoop<()>), WindowError> {
        info!("Opening {}x{} window", config.width, config.height);

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| WindowError::Display(e.to_string()))?;

        let window = window.ok_or(WindowError::WindowCreation)?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };

        let gl_context = gl_context.make_current(&gl_surface)?;

        // Load OpenGL function pointers
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                clear_color: config.clear_color,
            },
            event_loop,
        ))
    }

    /// Runs the render loop until the window is closed or Escape is pressed.
    ///
    /// Each frame: clear, `on_frame`, swap. Resources captured by the closure
    /// drop in order after the loop exits, while the context is still current.
    pub fn run<F>(mut self, event_loop: EventLoop<()>, mut on_frame: F) -> Result<(), WindowError>
    where
        F: FnMut(),
    {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => elwt.exit(),
                WindowEvent::Resized(size) => self.resize(size),
                WindowEvent::RedrawRequested => {
                    self.clear();
                    on_frame();
                    if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
                        log::error!("Failed to swap buffers: {}", e);
                    }
                }
                _ => (),
            },
            Event::AboutToWait => self.window.request_redraw(),
            _ => (),
        })?;

        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.gl_surface.resize(&self.gl_context, width, height);
            unsafe {
                gl::Viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
    }

    fn clear(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

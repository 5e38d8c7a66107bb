use anyhow::Result;
use gl::types::GLenum;
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
    ptr,
    time::Instant,
};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

use glscene::{
    config::{self, AppConfig},
    render::Renderer,
    RenderError,
};

// Field order matters: the renderer's GL objects must be released while the
// context is still alive.
struct App {
    renderer: Option<Renderer>,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    config: AppConfig,
    start: Instant,
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        // DisplayBuilder errors out before calling the picker with no configs.
        .expect("display offered no GL configs")
}

fn gl_string(name: GLenum) -> Option<String> {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
        }
    }
}

impl App {
    fn new(config: AppConfig) -> Result<(Self, EventLoop<()>)> {
        info!("Initializing application...");

        let event_loop = EventLoopBuilder::new()
            .build()
            .map_err(|e| RenderError::Context(e.to_string()))?;
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(config.window.resizable);

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, pick_config)
            .map_err(|e| RenderError::Context(e.to_string()))?;
        let window =
            window.ok_or_else(|| RenderError::Context("window was not created".to_string()))?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(window.raw_window_handle()));

        let gl_display = gl_config.display();

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| RenderError::Context(format!("OpenGL 3.3 core context: {e}")))?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(|e| RenderError::Context(format!("window surface: {e}")))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| RenderError::Context(format!("make current: {e}")))?;

        // Load OpenGL functions
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
            Err(_) => ptr::null(),
        });

        info!(
            "OpenGL {} on {}",
            gl_string(gl::VERSION).unwrap_or_default(),
            gl_string(gl::RENDERER).unwrap_or_default()
        );

        if config.render.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("Failed to enable vsync: {}", e);
            }
        }

        let size = window.inner_size();
        let renderer = Renderer::new(
            &config.scene.descriptor(),
            &config,
            (size.width, size.height),
            0.0,
        )?;

        Ok((
            Self {
                renderer: Some(renderer),
                gl_surface,
                gl_context,
                window,
                config,
                start: Instant::now(),
            },
            event_loop,
        ))
    }

    /// Returns `true` when the event loop should exit.
    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => true,
            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    self.gl_surface.resize(&self.gl_context, width, height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(size.width, size.height, &self.config);
                    }
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                false
            }
            _ => false,
        }
    }

    fn redraw(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        renderer.render_frame(self.start.elapsed().as_secs_f64());

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("Failed to swap buffers: {}", e);
        }
    }

    fn cleanup(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            info!("Shutting down '{}' scene", renderer.kind());
            drop(renderer);
        }
    }
}

fn main() -> Result<()> {
    let config_path = config::config_path()?;
    let existed = config_path.exists();
    let mut config = config::load_or_create_at(&config_path)?;
    SimpleLogger::new().with_level(config.level_filter()?).init()?;

    if existed {
        info!("Loaded config from {}", config_path.display());
    } else {
        info!("Wrote default config to {}", config_path.display());
    }

    if let Some(scene) = std::env::args().nth(1) {
        config.scene = scene.parse()?;
    }
    info!("Selected scene: {}", config.scene);

    let (mut app, event_loop) = App::new(config)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            if app.handle_window_event(&event) {
                app.cleanup();
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            app.window.request_redraw();
        }
        _ => (),
    })
    .map_err(|e| RenderError::Context(e.to_string()))?;

    Ok(())
}

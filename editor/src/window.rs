use std::path::Path;
use std::sync::Arc;

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use gui::{EditorStyle, EditorWindow, EventLoopFault, GuiApplication, GuiToolkit, ScreenRect};
use wgpu_utils::{SurfaceConfig, SurfaceDefaults};

use crate::state::State;

/// Screen assumed when the platform reports no monitor at all.
const FALLBACK_SCREEN: ScreenRect = ScreenRect {
    x: 0,
    y: 0,
    width: 1280,
    height: 800,
};

/// winit + wgpu implementation of the windowing layer.
#[derive(Debug, Default)]
pub struct WinitToolkit {
    surface: SurfaceDefaults,
}

impl GuiToolkit for WinitToolkit {
    type Application = EditorApplication;

    fn apply_default_surface_config(&mut self, config: &SurfaceConfig) -> bool {
        self.surface.set_default(config.clone())
    }

    /// Creates the event loop. The surface defaults are fixed from here on.
    fn create_application(&mut self) -> anyhow::Result<EditorApplication> {
        let event_loop =
            EventLoop::new().map_err(|err| anyhow::anyhow!("failed to create the event loop: {err}"))?;
        Ok(EditorApplication {
            event_loop,
            surface: self.surface.seal(),
            style: EditorStyle::default(),
        })
    }
}

pub struct EditorApplication {
    event_loop: EventLoop<()>,
    surface: SurfaceConfig,
    style: EditorStyle,
}

impl GuiApplication for EditorApplication {
    type Window = MainWindow;

    fn set_style_sheet(&mut self, style_sheet: &str) {
        match EditorStyle::parse(style_sheet) {
            Ok(style) => self.style = style,
            Err(err) => log::warn!("{err}; keeping the default style"),
        }
    }

    fn primary_screen_geometry(&self) -> ScreenRect {
        let monitor = self
            .event_loop
            .primary_monitor()
            .or_else(|| self.event_loop.available_monitors().next());
        match monitor {
            Some(monitor) => {
                let position = monitor.position();
                let size = monitor.size();
                ScreenRect::new(position.x, position.y, size.width, size.height)
            }
            None => {
                log::warn!(
                    "No monitor reported, assuming a {}x{} screen",
                    FALLBACK_SCREEN.width,
                    FALLBACK_SCREEN.height
                );
                FALLBACK_SCREEN
            }
        }
    }

    fn create_main_window(&mut self) -> anyhow::Result<MainWindow> {
        let window = WindowBuilder::new()
            .with_visible(false)
            .build(&self.event_loop)
            .map_err(|err| anyhow::anyhow!("failed to create the window: {err}"))?;
        let state = pollster::block_on(State::new(Arc::new(window), &self.surface, self.style.visuals()))
            .map_err(|err| anyhow::anyhow!("failed to set up graphics for the main window: {err}"))?;

        Ok(MainWindow {
            state,
            title: String::new(),
        })
    }

    /// Runs the event loop.
    ///
    /// The loop waits for events and redraws on demand. It ends when the
    /// window is closed or Escape is pressed, which yields exit code 0, or
    /// when the surface runs out of memory, which is reported as a fault.
    fn exec(self, mut window: MainWindow) -> Result<i32, EventLoopFault> {
        let EditorApplication { event_loop, .. } = self;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut fault = None;
        let mut last_render_time = instant::Instant::now();

        event_loop.run(|event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.state.window.id() && !window.state.input(event) => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            logical_key: Key::Named(NamedKey::Escape),
                            ..
                        },
                    ..
                } => elwt.exit(),
                WindowEvent::Resized(physical_size) => window.state.resize(*physical_size),
                WindowEvent::DroppedFile(path) => window.open_scene(path),
                WindowEvent::RedrawRequested => {
                    let now = instant::Instant::now();
                    let dt = now - last_render_time;
                    last_render_time = now;
                    window.state.update(dt);
                    match window.state.render() {
                        Ok(()) => {}
                        // Reconfigure the surface if it's lost or outdated
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => window.state.reconfigure(),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            fault = Some(EventLoopFault::SurfaceOutOfMemory);
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout"),
                    }
                    if let Some(path) = window.state.take_open_request() {
                        window.open_scene(&path);
                    }
                }
                _ => {}
            },
            _ => {}
        })?;

        match fault {
            Some(fault) => Err(fault),
            None => Ok(0),
        }
    }
}

/// The editor's single top-level window.
pub struct MainWindow {
    state: State,
    title: String,
}

impl MainWindow {
    fn refresh_title(&self) {
        let title = match self.state.scene.title() {
            Some(scene) => format!("{} - {scene}", self.title),
            None => self.title.clone(),
        };
        self.state.window.set_title(&title);
    }
}

impl EditorWindow for MainWindow {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.refresh_title();
    }

    /// Places and sizes the client area at `rect`. The frame sits outside it.
    fn set_geometry(&mut self, rect: ScreenRect) {
        let window = &self.state.window;
        // Unknown on some platforms (Wayland); the frame is then assumed to be zero-sized
        let (frame_x, frame_y) = match (window.outer_position(), window.inner_position()) {
            (Ok(outer), Ok(inner)) => (inner.x - outer.x, inner.y - outer.y),
            _ => (0, 0),
        };
        let outer = rect.translated(-frame_x, -frame_y);
        window.set_outer_position(PhysicalPosition::new(outer.x, outer.y));
        if let Some(size) = window.request_inner_size(PhysicalSize::new(rect.width, rect.height)) {
            self.state.resize(size);
        }
    }

    fn show(&mut self) {
        self.state.window.set_visible(true);
        self.state.window.request_redraw();
    }

    fn open_scene(&mut self, path: &Path) {
        self.state.open_scene(path);
        self.refresh_title();
    }
}

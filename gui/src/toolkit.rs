//! Contract between the editor's startup sequence and the windowing layer.
//!
//! The orchestrator only ever talks to these traits, so the platform toolkit
//! can be swapped for a recording fake in tests.

use std::path::Path;

use wgpu_utils::SurfaceConfig;

use crate::ScreenRect;

/// An unrecovered failure raised while the event loop is running.
#[derive(Debug, thiserror::Error)]
pub enum EventLoopFault {
    #[error("windowing platform error: {0}")]
    Platform(#[from] winit::error::EventLoopError),

    #[error("graphics surface ran out of memory")]
    SurfaceOutOfMemory,

    #[error("event loop panicked: {0}")]
    Panic(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

/// The editor's main window.
pub trait EditorWindow {
    fn set_title(&mut self, title: &str);

    fn set_geometry(&mut self, rect: ScreenRect);

    fn show(&mut self);

    /// Opens the scene at `path`. Failures are reported by the window itself;
    /// the editor stays usable without a scene.
    fn open_scene(&mut self, path: &Path);
}

/// The GUI application object. Owns the event loop.
pub trait GuiApplication {
    type Window: EditorWindow;

    fn set_style_sheet(&mut self, style_sheet: &str);

    fn primary_screen_geometry(&self) -> ScreenRect;

    /// Constructs the main window, hidden.
    fn create_main_window(&mut self) -> anyhow::Result<Self::Window>;

    /// Runs the event loop until the application asks to quit and returns its exit code.
    fn exec(self, window: Self::Window) -> Result<i32, EventLoopFault>;
}

/// Entry point to the windowing layer.
pub trait GuiToolkit {
    type Application: GuiApplication;

    /// Sets the default surface attributes for every graphics window created
    /// afterwards. Has no effect once the application exists; returns whether
    /// the config was applied.
    fn apply_default_surface_config(&mut self, config: &SurfaceConfig) -> bool;

    fn create_application(&mut self) -> anyhow::Result<Self::Application>;
}

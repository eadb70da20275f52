mod geometry;
mod gui;
mod gui_info;
mod gui_structure;
mod style;
mod toolkit;

pub use geometry::ScreenRect;
pub use gui::{EguiRenderer, RenderTarget};
pub use gui_structure::{gui, GuiConfig, SceneStatus};
pub use style::{EditorStyle, StyleError};
pub use toolkit::{EditorWindow, EventLoopFault, GuiApplication, GuiToolkit};

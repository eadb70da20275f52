use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use egui::Visuals;
use egui_wgpu::ScreenDescriptor;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

use gui::{gui, EguiRenderer, GuiConfig, RenderTarget, SceneStatus};
use scene::SceneDocument;
use wgpu_utils::{setup_gpu, Gpu, SurfaceConfig, SurfaceSetupError};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.2,
    b: 0.3,
    a: 1.0,
};

/// Frames kept for the FPS average.
const FPS_WINDOW: usize = 100;

/// Everything drawn into the main window.
pub struct State {
    pub window: Arc<Window>,
    gpu: Gpu,
    pub size: PhysicalSize<u32>,
    //GUI
    egui: EguiRenderer,
    gui_config: GuiConfig,
    pub scene: SceneStatus,
    fps: VecDeque<f32>,
}

impl State {
    /// Sets up the GPU for `window` with the sealed surface defaults and
    /// creates the egui renderer on top of it.
    pub async fn new(
        window: Arc<Window>,
        surface_config: &SurfaceConfig,
        visuals: Visuals,
    ) -> Result<Self, SurfaceSetupError> {
        let gpu = setup_gpu(Arc::clone(&window), surface_config).await?;
        log::info!(
            "Surface ready: {:?}, {} samples, depth {:?}",
            gpu.config.format,
            gpu.sample_count,
            gpu.depth_format
        );

        let egui = EguiRenderer::new(
            &gpu.device,
            gpu.config.format,
            gpu.depth_format,
            gpu.sample_count,
            &window,
            visuals,
        );
        let size = window.inner_size();

        Ok(Self {
            window,
            gpu,
            size,
            egui,
            gui_config: GuiConfig::default(),
            scene: SceneStatus::Empty,
            fps: VecDeque::with_capacity(FPS_WINDOW),
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu.resize(new_size.width, new_size.height);
        }
    }

    /// Reconfigures the surface after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.gpu.reconfigure();
    }

    /// Feeds a window event to the GUI. Returns whether the GUI consumed it.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        let response = self.egui.handle_input(&self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }
        response.consumed
    }

    pub fn update(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        if seconds > 0.0 {
            self.fps.push_front(1.0 / seconds);
            self.fps.truncate(FPS_WINDOW);
        }
    }

    fn average_fps(&self) -> f32 {
        if self.fps.is_empty() {
            return 0.0;
        }
        self.fps.iter().sum::<f32>() / self.fps.len() as f32
    }

    /// Loads the scene at `path`. A failed load is shown in the scene panel
    /// and leaves the editor running.
    pub fn open_scene(&mut self, path: &Path) {
        self.gui_config.show_path(path);
        self.scene = match SceneDocument::load(path) {
            Ok(document) => SceneStatus::Loaded {
                path: path.to_path_buf(),
                document,
            },
            Err(err) => {
                log::error!("Failed to open scene {}: {err}", path.display());
                SceneStatus::Failed {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                }
            }
        };
        self.window.request_redraw();
    }

    /// Scene the user asked to open from the GUI during the last frame.
    pub fn take_open_request(&mut self) -> Option<PathBuf> {
        self.gui_config.take_open_request()
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Editor Encoder"),
            });

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        // With MSAA the frame is drawn multisampled and resolved into the surface.
        let target = match self.gpu.msaa_view() {
            Some(msaa_view) => RenderTarget {
                view: msaa_view,
                resolve_target: Some(&view),
                depth: self.gpu.depth_view(),
                clear_color: CLEAR_COLOR,
            },
            None => RenderTarget {
                view: &view,
                resolve_target: None,
                depth: self.gpu.depth_view(),
                clear_color: CLEAR_COLOR,
            },
        };

        let fps = self.average_fps();
        let scene = &self.scene;
        let gui_config = &mut self.gui_config;
        let callback_buffers = self.egui.draw(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &self.window,
            target,
            screen_descriptor,
            |ui| gui(ui, scene, fps, gui_config),
        );

        self.gpu
            .queue
            .submit(callback_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }
}

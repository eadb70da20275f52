use egui::{Context, Visuals};
use egui_wgpu::{Renderer, ScreenDescriptor};
use egui_winit::{EventResponse, State};
use winit::event::WindowEvent;
use winit::window::Window;

/// Attachments a frame is drawn into.
pub struct RenderTarget<'a> {
    /// Color attachment. The multisampled buffer when MSAA is on, else the surface view.
    pub view: &'a wgpu::TextureView,
    /// Surface view to resolve into when `view` is multisampled.
    pub resolve_target: Option<&'a wgpu::TextureView>,
    pub depth: Option<&'a wgpu::TextureView>,
    pub clear_color: wgpu::Color,
}

/// Glue between egui, winit input and the wgpu renderer.
pub struct EguiRenderer {
    pub context: Context,
    state: State,
    renderer: Renderer,
}

impl EguiRenderer {
    pub fn new(
        device: &wgpu::Device,
        output_color_format: wgpu::TextureFormat,
        output_depth_format: Option<wgpu::TextureFormat>,
        msaa_samples: u32,
        window: &Window,
        visuals: Visuals,
    ) -> EguiRenderer {
        let egui_context = Context::default();
        let id = egui_context.viewport_id();
        egui_context.set_visuals(visuals);

        let egui_state = State::new(
            egui_context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = Renderer::new(device, output_color_format, output_depth_format, msaa_samples);

        EguiRenderer {
            context: egui_context,
            state: egui_state,
            renderer: egui_renderer,
        }
    }

    pub fn handle_input(&mut self, window: &Window, event: &WindowEvent) -> EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Clears `target` and draws one egui frame built by `run_ui` into it.
    ///
    /// Returns command buffers produced by paint callbacks; submit them before `encoder`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        target: RenderTarget<'_>,
        screen_descriptor: ScreenDescriptor,
        run_ui: impl FnOnce(&Context),
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.context.run(raw_input, run_ui);

        self.state.handle_platform_output(window, full_output.platform_output);

        let tris = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let callback_buffers = self
            .renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Editor Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.view,
                    resolve_target: target.resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(target.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: target.depth.map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
        callback_buffers
    }
}

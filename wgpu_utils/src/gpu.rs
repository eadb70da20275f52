use std::sync::Arc;

use winit::window::Window;

use crate::SurfaceConfig;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceSetupError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,

    #[error("failed to open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("window surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Device, queue and configured surface for one editor window, plus the
/// multisample and depth attachments derived from the [`SurfaceConfig`].
pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub sample_count: u32,
    pub depth_format: Option<wgpu::TextureFormat>,
    msaa_view: Option<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
}

/// Opens a device for `window` and configures its surface from `surface_config`.
pub async fn setup_gpu(window: Arc<Window>, surface_config: &SurfaceConfig) -> Result<Gpu, SurfaceSetupError> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: surface_config.backends(),
        dx12_shader_compiler: Default::default(),
        gles_minor_version: surface_config.gles_minor_version(),
        flags: wgpu::InstanceFlags::from_build_config(),
    });

    let surface = instance.create_surface(Arc::clone(&window))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(SurfaceSetupError::NoAdapter)?;
    log::info!("Using adapter {}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Editor Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
            },
            None,
        )
        .await?;

    let surface_caps = surface.get_capabilities(&adapter);
    // egui expects a linear target
    let format = surface_caps
        .formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| surface_caps.formats.first().copied())
        .ok_or(SurfaceSetupError::NoSurfaceFormat)?;

    let sample_count = supported_sample_count(&adapter, format, surface_config.sample_count());
    let size = window.inner_size();

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: surface_config.present_mode(),
        alpha_mode: surface_config.alpha_mode(&surface_caps.alpha_modes),
        view_formats: vec![],
        desired_maximum_frame_latency: surface_config.frame_latency(),
    };
    surface.configure(&device, &config);

    let mut gpu = Gpu {
        surface,
        device,
        queue,
        config,
        sample_count,
        depth_format: surface_config.depth_format(),
        msaa_view: None,
        depth_view: None,
    };
    gpu.create_attachments();
    Ok(gpu)
}

impl Gpu {
    /// Reconfigures the surface and rebuilds the attachments. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.create_attachments();
    }

    /// Reapplies the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Multisampled color target, present when `sample_count > 1`.
    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa_view.as_ref()
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_view.as_ref()
    }

    fn create_attachments(&mut self) {
        let size = wgpu::Extent3d {
            width: self.config.width,
            height: self.config.height,
            depth_or_array_layers: 1,
        };

        self.msaa_view = (self.sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("Multisample Color Buffer"),
                    size,
                    mip_level_count: 1,
                    sample_count: self.sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        self.depth_view = self.depth_format.map(|format| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("Depth Buffer"),
                    size,
                    mip_level_count: 1,
                    sample_count: self.sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });
    }
}

fn supported_sample_count(adapter: &wgpu::Adapter, format: wgpu::TextureFormat, requested: u32) -> u32 {
    if requested <= 1 {
        return 1;
    }
    let flags = adapter.get_texture_format_features(format).flags;
    if flags.sample_count_supported(requested) {
        requested
    } else {
        log::warn!("{requested}x multisampling is not supported for {format:?}, rendering without it");
        1
    }
}

use serde::Deserialize;

/// Graphics API profile requested for editor surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Core,
    Compatibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Buffering {
    Single,
    Double,
    Triple,
}

/// Default attributes for every graphics surface the editor creates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub major_version: u8,
    pub minor_version: u8,
    pub profile: Profile,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub samples: u32,
    pub buffering: Buffering,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            major_version: 3,
            minor_version: 2,
            profile: Profile::Core,
            alpha_bits: 8,
            depth_bits: 24,
            samples: 4,
            buffering: Buffering::Double,
        }
    }
}

impl SurfaceConfig {
    /// Backends to probe. `WGPU_BACKEND` overrides the profile's choice.
    pub fn backends(&self) -> wgpu::Backends {
        let fallback = match self.profile {
            Profile::Core => wgpu::Backends::PRIMARY,
            Profile::Compatibility => wgpu::Backends::all(),
        };
        wgpu::util::backend_bits_from_env().unwrap_or(fallback)
    }

    /// GLES minor version for the GL backend. Only 3.x versions map to a fixed minor.
    pub fn gles_minor_version(&self) -> wgpu::Gles3MinorVersion {
        match (self.major_version, self.minor_version) {
            (3, 0) => wgpu::Gles3MinorVersion::Version0,
            (3, 1) => wgpu::Gles3MinorVersion::Version1,
            (3, 2) => wgpu::Gles3MinorVersion::Version2,
            _ => wgpu::Gles3MinorVersion::Automatic,
        }
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        match self.depth_bits {
            0 => None,
            1..=16 => Some(wgpu::TextureFormat::Depth16Unorm),
            17..=24 => Some(wgpu::TextureFormat::Depth24Plus),
            _ => Some(wgpu::TextureFormat::Depth32Float),
        }
    }

    /// Picks an alpha mode out of the modes the surface supports.
    pub fn alpha_mode(&self, supported: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
        if self.alpha_bits == 0 && supported.contains(&wgpu::CompositeAlphaMode::Opaque) {
            return wgpu::CompositeAlphaMode::Opaque;
        }
        supported
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        match self.buffering {
            Buffering::Single => wgpu::PresentMode::AutoNoVsync,
            Buffering::Double | Buffering::Triple => wgpu::PresentMode::Fifo,
        }
    }

    pub fn frame_latency(&self) -> u32 {
        match self.buffering {
            Buffering::Single => 1,
            Buffering::Double => 2,
            Buffering::Triple => 3,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.samples.max(1)
    }
}

/// The process-wide default [`SurfaceConfig`].
///
/// Sealed once the GUI application object exists. After that, setting a new
/// default has no effect, mirroring platforms where the default context format
/// is only read before the first window.
#[derive(Debug, Default)]
pub struct SurfaceDefaults {
    config: SurfaceConfig,
    sealed: bool,
}

impl SurfaceDefaults {
    /// Replaces the default. Returns `false` and leaves the default untouched
    /// if it is already sealed.
    pub fn set_default(&mut self, config: SurfaceConfig) -> bool {
        if self.sealed {
            log::warn!("Surface config set after the GUI application was created; ignoring it");
            return false;
        }
        log::info!(
            "Default surface: API {}.{} {:?}, alpha {} bits, depth {} bits, {} samples, {:?} buffering",
            config.major_version,
            config.minor_version,
            config.profile,
            config.alpha_bits,
            config.depth_bits,
            config.samples,
            config.buffering
        );
        self.config = config;
        true
    }

    pub fn current(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Freezes the default and returns the config every surface will use.
    pub fn seal(&mut self) -> SurfaceConfig {
        self.sealed = true;
        self.config.clone()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

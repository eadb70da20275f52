mod gpu;
mod surface;

pub use gpu::{setup_gpu, Gpu, SurfaceSetupError};
pub use surface::{Buffering, Profile, SurfaceConfig, SurfaceDefaults};

//! # Engines
//!
//! Process-wide compute resources the editor provisions before any window
//! exists: the worker pool, the ray-tracing kernel bound to it, and the
//! optional volumetric engine.
//!
//! ## Modules
//!
//! - `thread_pool`: `WorkerCount` sizing and the fixed-size `WorkerPool`.
//! - `render_engine`: the `RenderEngine` lifecycle trait and the `RayKernel` handle.
//! - `volume`: volumetric engine initialization, compiled in with the `volume` feature.
//!
//! ## Usage
//!
//! ```no_run
//! use engines::{bootstrap, RayKernel, WorkerCount};
//!
//! let engines = bootstrap(WorkerCount::ideal(), RayKernel::new()).unwrap();
//! assert!(engines.render.is_running());
//! ```
use std::sync::Arc;

mod error;
mod render_engine;
mod thread_pool;
pub mod volume;

pub use error::EngineError;
pub use render_engine::{RayKernel, RenderEngine};
pub use thread_pool::{WorkerCount, WorkerPool};
pub use volume::VolumeModule;

/// Engines brought up by [`bootstrap`]. Keep this alive for the process lifetime.
pub struct Engines<R> {
    pub pool: Arc<WorkerPool>,
    pub render: R,
    pub volume: VolumeModule,
}

/// Starts the worker pool, initializes `render` and binds it to the pool, then
/// initializes the volumetric engine if the build has one.
///
/// # Errors
///
/// Any [`EngineError`] from the pool or the render engine. These are fatal.
pub fn bootstrap<R: RenderEngine>(count: WorkerCount, mut render: R) -> Result<Engines<R>, EngineError> {
    let pool = Arc::new(WorkerPool::start(count)?);

    render.init()?;
    render.start_threads(&pool)?;

    let volume = volume::init_if_present();
    log::info!("Bootstrap complete: {count} workers, volumetric engine {volume:?}");

    Ok(Engines { pool, render, volume })
}

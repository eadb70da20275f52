use std::sync::{Arc, Barrier};
use std::time::{Duration, Instant};

use crate::{EngineError, WorkerPool};

/// The ray-tracing acceleration engine as seen by the bootstrap sequence.
///
/// Callers run [`init`](RenderEngine::init) exactly once and then hand the
/// engine the worker pool with [`start_threads`](RenderEngine::start_threads).
/// Either failing is fatal.
pub trait RenderEngine {
    fn init(&mut self) -> Result<(), EngineError>;

    /// Binds every worker of `pool` to the engine.
    fn start_threads(&mut self, pool: &Arc<WorkerPool>) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KernelState {
    Uninitialized,
    Initialized,
    Running,
}

/// Process-wide ray-tracing kernel handle.
///
/// Tracing itself lives behind this handle; the editor only drives its
/// lifecycle and lends it the worker pool.
pub struct RayKernel {
    state: KernelState,
    pool: Option<Arc<WorkerPool>>,
    bound_workers: Vec<String>,
    bind_timeout: Duration,
}

impl RayKernel {
    pub fn new() -> Self {
        Self {
            state: KernelState::Uninitialized,
            pool: None,
            bound_workers: Vec::new(),
            bind_timeout: Duration::from_secs(10),
        }
    }

    /// How long `start_threads` waits for every worker to check in.
    pub fn with_bind_timeout(mut self, timeout: Duration) -> Self {
        self.bind_timeout = timeout;
        self
    }

    /// Names of the pool threads bound by `start_threads`.
    pub fn bound_workers(&self) -> &[String] {
        &self.bound_workers
    }

    pub fn is_running(&self) -> bool {
        self.state == KernelState::Running
    }
}

impl Default for RayKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for RayKernel {
    fn init(&mut self) -> Result<(), EngineError> {
        if self.state != KernelState::Uninitialized {
            return Err(EngineError::AlreadyInitialized);
        }
        self.state = KernelState::Initialized;
        log::info!("Ray-tracing kernel initialized");
        Ok(())
    }

    fn start_threads(&mut self, pool: &Arc<WorkerPool>) -> Result<(), EngineError> {
        match self.state {
            KernelState::Uninitialized => return Err(EngineError::NotInitialized),
            KernelState::Running => return Err(EngineError::ThreadsAlreadyStarted),
            KernelState::Initialized => {}
        }

        // Every binding job waits on the same barrier, so each one occupies a distinct worker.
        let expected = pool.size().get();
        let barrier = Arc::new(Barrier::new(expected));
        let (tx, rx) = crossbeam_channel::bounded(expected);
        for _ in 0..expected {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            pool.execute(move || {
                barrier.wait();
                let name = std::thread::current()
                    .name()
                    .unwrap_or("unnamed")
                    .to_owned();
                let _ = tx.send(name);
            })?;
        }
        drop(tx);

        let deadline = Instant::now() + self.bind_timeout;
        let mut bound = Vec::with_capacity(expected);
        while bound.len() < expected {
            match rx.recv_deadline(deadline) {
                Ok(name) => bound.push(name),
                Err(_) => break,
            }
        }
        if bound.len() < expected {
            return Err(EngineError::WorkerBinding {
                bound: bound.len(),
                expected,
            });
        }

        bound.sort();
        log::info!("Ray-tracing kernel bound to {} workers", bound.len());
        self.bound_workers = bound;
        self.pool = Some(Arc::clone(pool));
        self.state = KernelState::Running;
        Ok(())
    }
}

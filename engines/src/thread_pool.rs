use std::fmt;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Sender};

use crate::EngineError;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Number of persistent workers provisioned for the render engine.
///
/// Never zero. Fixed once computed; the pool is never resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    /// Derives the worker count from the host's logical core count, keeping
    /// one core free for the GUI thread.
    pub fn from_parallelism(parallelism: usize) -> Self {
        Self::exact(parallelism.saturating_sub(1))
    }

    /// Uses `count` workers as given, clamped to at least one.
    pub fn exact(count: usize) -> Self {
        Self(NonZeroUsize::new(count).unwrap_or(NonZeroUsize::MIN))
    }

    /// Reads the host parallelism and derives the worker count from it.
    pub fn ideal() -> Self {
        Self::from_parallelism(num_cpus::get())
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-size pool of named worker threads fed from a shared job queue.
///
/// Workers live until the pool is dropped. The editor keeps its pool alive
/// for the whole process, so in practice teardown is process exit.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    count: WorkerCount,
}

impl WorkerPool {
    /// Spawns `count` workers named `worker-<index>`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SpawnWorker`] if the OS refuses a thread. Any
    /// workers spawned before the failure exit once the queue is dropped.
    pub fn start(count: WorkerCount) -> Result<Self, EngineError> {
        let (sender, receiver) = unbounded::<Job>();
        let mut workers = Vec::with_capacity(count.get());

        for index in 0..count.get() {
            let receiver = receiver.clone();
            let handle = std::thread::Builder::new()
                .name(format!("worker-{index}"))
                .spawn(move || {
                    while let Ok(job) = receiver.recv() {
                        // A panicking job must not take its worker down with it.
                        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                            log::error!("Job panicked on worker-{index}");
                        }
                    }
                })
                .map_err(|source| EngineError::SpawnWorker { index, source })?;
            workers.push(handle);
        }

        log::info!("Started {count} pool workers");
        Ok(Self {
            sender: Some(sender),
            workers,
            count,
        })
    }

    /// Queues a job for the next idle worker.
    pub fn execute<F>(&self, job: F) -> Result<(), EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(EngineError::PoolClosed)?;
        sender
            .send(Box::new(job))
            .map_err(|_| EngineError::PoolClosed)
    }

    pub fn size(&self) -> WorkerCount {
        self.count
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the queue ends every worker's receive loop.
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Errors raised while provisioning the worker pool or the ray-tracing kernel.
///
/// Every variant is fatal to the editor: bootstrap does not continue without
/// a working pool and kernel.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread {index}: {source}")]
    SpawnWorker {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// A job was submitted after the pool stopped accepting work.
    #[error("worker pool is shut down")]
    PoolClosed,

    /// `init` was called twice on the same kernel.
    #[error("ray-tracing kernel is already initialized")]
    AlreadyInitialized,

    /// `start_threads` was called before `init`.
    #[error("ray-tracing kernel must be initialized before its threads are started")]
    NotInitialized,

    /// `start_threads` was called on a kernel that already owns workers.
    #[error("ray-tracing kernel threads are already running")]
    ThreadsAlreadyStarted,

    /// Not every pool worker checked in with the kernel in time.
    #[error("only {bound} of {expected} workers bound to the ray-tracing kernel")]
    WorkerBinding { bound: usize, expected: usize },
}

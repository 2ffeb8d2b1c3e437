//! Executor abstraction for CPU-bound pipeline stages.
//!
//! The terrain pipeline depends on [`BlockingExecutor`] rather than on Tokio
//! directly, so mosaic composition, cropping, decoding and normalization can
//! run on Tokio's blocking pool in production and inline in tests.
//!
//! ```text
//! ┌─────────────────────┐
//! │   TerrainPipeline   │
//! │                     │
//! │  - fetch (async)    │
//! │  - raster stages    │
//! └─────────┬───────────┘
//!           │ depends on
//!           ▼
//! ┌─────────────────────┐
//! │  BlockingExecutor   │
//! └─────────┬───────────┘
//!           │ implemented by
//!           ▼
//! ┌─────────────────────┐
//! │  TokioExecutor      │  spawn_blocking
//! │  SyncExecutor       │  current thread
//! └─────────────────────┘
//! ```

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`BlockingExecutor::execute_blocking`].
pub type BlockingResult<R> = Pin<Box<dyn Future<Output = Result<R, ExecutorError>> + Send>>;

/// Trait for executing blocking (CPU-bound) work off the async runtime.
pub trait BlockingExecutor: Send + Sync + 'static {
    /// Executes a blocking closure, resolving to its return value.
    fn execute_blocking<F, R>(&self, f: F) -> BlockingResult<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static;
}

/// Errors that can occur during executor operations.
#[derive(Debug, Clone)]
pub enum ExecutorError {
    /// A spawned task panicked
    TaskPanicked(String),
    /// The task was cancelled before completing
    Cancelled,
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::TaskPanicked(msg) => write!(f, "task panicked: {}", msg),
            ExecutorError::Cancelled => write!(f, "task cancelled"),
        }
    }
}

impl std::error::Error for ExecutorError {}

/// Tokio-based executor that delegates to `spawn_blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

impl TokioExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl BlockingExecutor for TokioExecutor {
    fn execute_blocking<F, R>(&self, f: F) -> BlockingResult<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        Box::pin(async move {
            tokio::task::spawn_blocking(f).await.map_err(|e| {
                if e.is_cancelled() {
                    ExecutorError::Cancelled
                } else {
                    ExecutorError::TaskPanicked(e.to_string())
                }
            })
        })
    }
}

/// Synchronous executor.
///
/// Executes "blocking" work immediately on the current thread. Useful for
/// tests and for callers driving the pipeline without a Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl BlockingExecutor for SyncExecutor {
    fn execute_blocking<F, R>(&self, f: F) -> BlockingResult<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let result = f();
        Box::pin(std::future::ready(Ok(result)))
    }
}

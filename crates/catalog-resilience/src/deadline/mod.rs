//! Deadline guard for downstream calls.

use catalog_core::{CatalogError, CatalogResult};
use futures::{Stream, TryStreamExt};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinError;
use tracing::error;

/// Name given to the worker pool threads.
pub const WORKER_THREAD_NAME: &str = "workers";

/// Message carried by every `ServiceTimeout` raised here.
pub const TIMEOUT_MESSAGE: &str = "Service call timeout";

/// Deadline guard configuration.
#[derive(Debug, Clone)]
pub struct DeadlineConfig {
    /// Deadline applied by [`DeadlineGuard::guard`].
    pub timeout: Duration,
    /// Size of the worker pool.
    pub worker_threads: usize,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            worker_threads: 8,
        }
    }
}

/// Runs downstream calls on a dedicated worker pool under a deadline.
///
/// The pool is a separate multi-threaded runtime, so slow calls never occupy
/// the threads serving requests. On timeout the spawned task is aborted and
/// the caller receives `ServiceTimeout`; the elapsed-timer error itself never
/// escapes.
pub struct DeadlineGuard {
    runtime: Option<Runtime>,
    handle: Handle,
    timeout: Duration,
}

impl DeadlineGuard {
    /// Builds the worker pool.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the worker runtime cannot be started.
    pub fn new(config: DeadlineConfig) -> CatalogResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name(WORKER_THREAD_NAME)
            .enable_all()
            .build()
            .map_err(|e| CatalogError::internal(format!("Failed to start worker pool: {}", e)))?;
        let handle = runtime.handle().clone();

        Ok(Self {
            runtime: Some(runtime),
            handle,
            timeout: config.timeout,
        })
    }

    /// Returns the configured deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs a single-value operation under the configured deadline.
    pub async fn guard<F, T>(&self, operation: F) -> CatalogResult<T>
    where
        F: Future<Output = CatalogResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.guard_within(self.timeout, operation).await
    }

    /// Runs a single-value operation under an explicit deadline.
    pub async fn guard_within<F, T>(&self, timeout: Duration, operation: F) -> CatalogResult<T>
    where
        F: Future<Output = CatalogResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut task = self.handle.spawn(operation);

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(joined) => joined.map_err(join_error)?,
            Err(_) => {
                task.abort();
                let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                error!(timeout_ms, "Service call timeout after {} ms", timeout_ms);
                Err(CatalogError::service_timeout(TIMEOUT_MESSAGE))
            }
        }
    }

    /// Drains a multi-value operation under the configured deadline.
    ///
    /// The deadline covers the whole sequence, not each element.
    pub async fn guard_stream<S, T>(&self, stream: S) -> CatalogResult<Vec<T>>
    where
        S: Stream<Item = CatalogResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.guard(async move { stream.try_collect::<Vec<T>>().await }).await
    }
}

impl Drop for DeadlineGuard {
    fn drop(&mut self) {
        // Dropping a runtime from inside async context panics.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for DeadlineGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineGuard")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn join_error(err: JoinError) -> CatalogError {
    if err.is_panic() {
        CatalogError::internal("Downstream call panicked")
    } else {
        CatalogError::internal("Downstream call was cancelled")
    }
}

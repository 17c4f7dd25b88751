//! Tokio Runtime Bridge
//!
//! The binary's `main` is synchronous; everything network-bound runs on one
//! shared multi-threaded runtime owned by this module.
//!
//! ## Pattern
//!
//! ```text
//! main()
//!   │
//!   ▼
//! block_on(app::run(...))
//!   │
//!   ├── SensorPoller::start_on(&runtime_handle())
//!   │
//!   ▼
//! tokio::Runtime (worker threads)
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::error::Result;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("terra-watch-worker")
        .build()?;
    // A concurrent initializer may have won; ours is then dropped unused.
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Use only from `main` or
/// other non-async entry points.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}

/// Get a handle to the tokio runtime
pub fn runtime_handle() -> Result<Handle> {
    Ok(get_runtime()?.handle().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn spawned_task_runs() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        let handle = runtime_handle().expect("handle").spawn(async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        block_on(handle).expect("runtime").expect("join");
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn handle_refers_to_shared_runtime() {
        let handle = runtime_handle().expect("handle");
        let value = block_on(async move { handle.spawn(async { 7 }).await })
            .expect("runtime")
            .expect("join");
        assert_eq!(value, 7);
    }
}

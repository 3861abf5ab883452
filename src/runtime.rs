//! Shared runtime for the blocking entry points.

use std::sync::LazyLock;
use tokio::runtime::{Builder, Runtime};

/// Multi-thread runtime, built on first use.
static RUNTIME: LazyLock<Option<Runtime>> =
    LazyLock::new(|| Builder::new_multi_thread().enable_all().build().ok());

/// Run a future to completion on the shared runtime.
///
/// Falls back to a fresh current-thread runtime if the shared one could not
/// be built.
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    match RUNTIME.as_ref() {
        Some(runtime) => runtime.block_on(future),
        None => Builder::new_current_thread()
            .enable_all()
            .build()
            .map(|runtime| runtime.block_on(future))
            .unwrap_or_else(|e| panic!("failed to build tokio runtime: {e}")),
    }
}

//! Guarded lazy-initialization for shared manager instances.

use std::sync::{Arc, OnceLock};

/// One shared, lazily constructed instance with an init hook that runs
/// exactly once. The one-time window spans both construction and the hook,
/// so no other caller can observe a partially initialized instance.
///
/// Replaces implicit process-global singletons: each `LazyShared` is owned
/// by the composition root and handed out as `Arc` clones.
pub struct LazyShared<T> {
    cell: OnceLock<Arc<T>>,
}

impl<T> LazyShared<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the shared instance, constructing it via `build` on first
    /// access. Concurrent first accesses block until the winner finishes.
    pub fn get_or_init(&self, build: impl FnOnce() -> T) -> Arc<T> {
        Arc::clone(self.cell.get_or_init(|| Arc::new(build())))
    }

    /// The instance, if it has already been initialized.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().map(Arc::clone)
    }
}

impl<T> Default for LazyShared<T> {
    fn default() -> Self {
        Self::new()
    }
}

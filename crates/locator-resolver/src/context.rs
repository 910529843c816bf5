// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-thread loading context.
//!
//! A thread may install a class loader that lookups made on it should use
//! instead of the resolver's system loader. The loader is installed with a
//! guard and removed again when the guard drops.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use locator_core::{ClassLoader, ContextSource, LocatorError};

thread_local! {
    static CONTEXT_LOADER: RefCell<Option<Arc<ClassLoader>>> = const { RefCell::new(None) };
}

/// Reads the loader installed on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadContext;

impl ContextSource for ThreadContext {
    fn context_loader(&self) -> Result<Option<Arc<ClassLoader>>, LocatorError> {
        CONTEXT_LOADER
            .try_with(|cell| {
                cell.try_borrow()
                    .map(|current| current.clone())
                    .map_err(|e| LocatorError::ContextUnavailable {
                        reason: format!("context loader is being replaced: {e}"),
                    })
            })
            .map_err(|e| LocatorError::ContextUnavailable {
                reason: format!("thread context destroyed: {e}"),
            })?
    }
}

/// Restores the previous context loader when dropped.
///
/// Not `Send`: it must drop on the thread that created it.
#[must_use = "the context loader is removed as soon as the guard drops"]
#[derive(Debug)]
pub struct ContextLoaderGuard {
    previous: Option<Arc<ClassLoader>>,
    /// False if the loader could not be installed; dropping then changes nothing.
    installed: bool,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextLoaderGuard {
    fn drop(&mut self) {
        if !self.installed {
            return;
        }
        let previous = self.previous.take();
        // Ignore a destroyed thread-local during thread teardown.
        let _ = CONTEXT_LOADER.try_with(|cell| {
            if let Ok(mut current) = cell.try_borrow_mut() {
                *current = previous;
            }
        });
    }
}

/// Install `loader` as the calling thread's context loader until the guard drops.
pub fn set_context_loader(loader: Arc<ClassLoader>) -> ContextLoaderGuard {
    let installed = CONTEXT_LOADER
        .try_with(|cell| cell.try_borrow_mut().ok().map(|mut c| c.replace(loader)))
        .ok()
        .flatten();
    ContextLoaderGuard {
        installed: installed.is_some(),
        previous: installed.flatten(),
        _not_send: PhantomData,
    }
}

/// Run `f` with `loader` as the calling thread's context loader.
pub fn with_context_loader<R>(loader: Arc<ClassLoader>, f: impl FnOnce() -> R) -> R {
    let _guard = set_context_loader(loader);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_by_default() {
        assert!(ThreadContext.context_loader().unwrap().is_none());
    }

    #[test]
    fn guard_installs_and_restores() {
        let outer = Arc::new(ClassLoader::new("outer"));
        let inner = Arc::new(ClassLoader::new("inner"));

        let guard = set_context_loader(outer);
        assert_eq!(ThreadContext.context_loader().unwrap().unwrap().name(), "outer");

        with_context_loader(inner, || {
            assert_eq!(ThreadContext.context_loader().unwrap().unwrap().name(), "inner");
        });
        assert_eq!(ThreadContext.context_loader().unwrap().unwrap().name(), "outer");

        drop(guard);
        assert!(ThreadContext.context_loader().unwrap().is_none());
    }

    #[test]
    fn context_is_per_thread() {
        let _guard = set_context_loader(Arc::new(ClassLoader::new("main")));
        let seen = std::thread::spawn(|| ThreadContext.context_loader().unwrap().is_none())
            .join()
            .unwrap();
        assert!(seen);
    }

    #[test]
    fn borrowed_context_is_unavailable() {
        let _guard = set_context_loader(Arc::new(ClassLoader::new("main")));
        let err = CONTEXT_LOADER.with(|cell| {
            let _held = cell.borrow_mut();
            ThreadContext.context_loader().unwrap_err()
        });
        assert!(matches!(err, LocatorError::ContextUnavailable { .. }));
    }

    #[test]
    fn failed_install_leaves_context_alone() {
        let _outer = set_context_loader(Arc::new(ClassLoader::new("outer")));
        let inner = CONTEXT_LOADER.with(|cell| {
            let _held = cell.borrow_mut();
            set_context_loader(Arc::new(ClassLoader::new("inner")))
        });
        drop(inner);
        assert_eq!(ThreadContext.context_loader().unwrap().unwrap().name(), "outer");
    }
}

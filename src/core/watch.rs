//! Polling-based directory change watching.
//!
//! No push channel exists to the file server, so change detection refetches
//! a watched listing on a fixed interval and compares fingerprints. The
//! registry holds at most one watcher per path; re-watching a path swaps
//! the callback on the existing timer instead of stacking a second one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Interval;

use crate::core::debug;

/// Shared, swappable change callback.
pub type WatchCallback = Rc<RefCell<Rc<dyn Fn()>>>;

/// Watcher registry, keyed by normalized path.
pub type WatcherMap = Rc<RefCell<HashMap<String, DirectoryWatcher>>>;

/// One active poll timer.
///
/// The tick closure owns its own fingerprint baseline; the registry only
/// needs the swappable callback and the timer itself. Dropping the watcher
/// cancels the underlying interval.
pub struct DirectoryWatcher {
    pub(crate) callback: WatchCallback,
    #[cfg(target_arch = "wasm32")]
    pub(crate) _interval: Interval,
}

/// Whether a freshly computed fingerprint counts as a change.
///
/// The first observation of a path establishes a baseline and never fires.
pub fn is_change(previous: Option<&str>, fresh: &str) -> bool {
    previous.is_some_and(|seen| seen != fresh)
}

/// Detachable subscription to a watched directory.
///
/// Holds the registry weakly: if the owning service is gone, `cancel`
/// quietly does nothing. An inert handle (static-manifest mode, where
/// watching is a documented no-op) cancels nothing by construction.
pub struct WatchHandle {
    path: String,
    watchers: Weak<RefCell<HashMap<String, DirectoryWatcher>>>,
}

impl WatchHandle {
    pub(crate) fn new(path: &str, watchers: Weak<RefCell<HashMap<String, DirectoryWatcher>>>) -> Self {
        Self {
            path: path.to_string(),
            watchers,
        }
    }

    /// Handle that was never attached to a timer.
    pub(crate) fn inert() -> Self {
        Self {
            path: String::new(),
            watchers: Weak::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Stop the watcher for this path, if it is still registered.
    pub fn cancel(&self) {
        let Some(registry) = self.watchers.upgrade() else {
            return;
        };
        if registry.borrow_mut().remove(&self.path).is_some() {
            debug::debug("watch", format!("stopped watching {:?}", self.path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn test_watcher(callback: Rc<dyn Fn()>) -> DirectoryWatcher {
        DirectoryWatcher {
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    fn fire(watcher: &DirectoryWatcher) {
        let callback = watcher.callback.borrow().clone();
        callback();
    }

    #[test]
    fn first_observation_is_not_a_change() {
        assert!(!is_change(None, "abc"));
        assert!(!is_change(Some("abc"), "abc"));
        assert!(is_change(Some("abc"), "def"));
    }

    #[test]
    fn swapping_the_callback_redirects_fires() {
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));

        let count = first.clone();
        let watcher = test_watcher(Rc::new(move || count.set(count.get() + 1)));
        fire(&watcher);

        // re-registering the same path swaps the callback in place
        let count = second.clone();
        *watcher.callback.borrow_mut() = Rc::new(move || count.set(count.get() + 1));
        fire(&watcher);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn cancel_removes_the_registry_entry() {
        let registry: WatcherMap = Rc::new(RefCell::new(HashMap::new()));
        registry
            .borrow_mut()
            .insert("docs".to_string(), test_watcher(Rc::new(|| {})));

        let handle = WatchHandle::new("docs", Rc::downgrade(&registry));
        assert_eq!(handle.path(), "docs");
        handle.cancel();
        assert!(registry.borrow().is_empty());

        // cancelling twice is fine
        handle.cancel();
    }

    #[test]
    fn inert_and_orphaned_handles_are_noops() {
        WatchHandle::inert().cancel();

        let registry: WatcherMap = Rc::new(RefCell::new(HashMap::new()));
        let handle = WatchHandle::new("gone", Rc::downgrade(&registry));
        drop(registry);
        handle.cancel();
    }
}

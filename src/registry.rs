//! The set of pinned windows.
//!
//! [`PinRegistry`] stores [`WindowHandle`]s only.  A handle does not keep its
//! window alive, so the registry may briefly hold handles of windows that
//! have since been closed; [`PinRegistry::cleanup`] drops them, and anything
//! that acts on a handle re-checks it against the window manager first.

use crate::command::{Window, WindowHandle};
use crate::traits::WindowManager;
use log::{info, warn};
use std::collections::HashSet;

/// Identity-keyed set of pinned windows.
///
/// None of the operations fail loudly: invalid input and state conflicts are
/// reported through the `bool` return value and a log line.  Informational
/// lines are only emitted when `verbose` is set.
#[derive(Debug, Default)]
pub struct PinRegistry {
    pinned: HashSet<WindowHandle>,
    verbose: bool,
}

impl PinRegistry {
    pub fn new(verbose: bool) -> Self {
        Self {
            pinned: HashSet::new(),
            verbose,
        }
    }

    /// Pin `window`.  Returns `false` if there is no window or it is
    /// already pinned.
    pub fn pin(&mut self, window: Option<&Window>) -> bool {
        let Some(window) = window else {
            warn!("cannot pin: no window");
            return false;
        };

        if !self.pinned.insert(window.handle) {
            if self.verbose {
                info!("window {} is already pinned", window.title);
            }
            return false;
        }

        if self.verbose {
            info!("pinned window: {}", window.title);
        }
        true
    }

    /// Unpin `window`.  Returns `false` if there is no window or it is not
    /// pinned.
    pub fn unpin(&mut self, window: Option<&Window>) -> bool {
        let Some(window) = window else {
            warn!("cannot unpin: no window");
            return false;
        };

        if !self.pinned.remove(&window.handle) {
            if self.verbose {
                info!("window {} is not pinned", window.title);
            }
            return false;
        }

        if self.verbose {
            info!("unpinned window: {}", window.title);
        }
        true
    }

    /// Unpin `window` if it is pinned, pin it otherwise.
    pub fn toggle_pin(&mut self, window: Option<&Window>) -> bool {
        let Some(w) = window else {
            warn!("cannot toggle pin: no window");
            return false;
        };

        if self.contains(w.handle) {
            self.unpin(window)
        } else {
            self.pin(window)
        }
    }

    pub fn is_pinned(&self, window: Option<&Window>) -> bool {
        window.is_some_and(|w| self.contains(w.handle))
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.pinned.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }

    /// Pinned handles in ascending order.
    pub fn handles(&self) -> Vec<WindowHandle> {
        let mut handles: Vec<_> = self.pinned.iter().copied().collect();
        handles.sort_unstable();
        handles
    }

    /// Drop every handle for which `is_live` returns `false`.  Returns the
    /// number of handles removed.
    pub fn retain_live(&mut self, is_live: impl Fn(WindowHandle) -> bool) -> usize {
        let before = self.pinned.len();
        self.pinned.retain(|h| is_live(*h));
        before - self.pinned.len()
    }

    /// Drop handles of windows that no longer exist.
    ///
    /// An empty registry does not query the window manager.  If the query
    /// fails nothing is dropped.
    pub fn cleanup<W: WindowManager>(&mut self, wm: &W) -> usize {
        if self.pinned.is_empty() {
            return 0;
        }

        let live: HashSet<WindowHandle> = match wm.windows() {
            Ok(windows) => windows.into_iter().map(|w| w.handle).collect(),
            Err(e) => {
                warn!("cannot check pinned windows, keeping all: {}", e);
                return 0;
            }
        };

        let removed = self.retain_live(|h| live.contains(&h));
        if removed > 0 && self.verbose {
            info!("dropped {} closed window(s) from the pin set", removed);
        }
        removed
    }
}

//! Recording [`WindowManager`] used by the unit tests.

use crate::command::{Monitor, MonitorId, Window, WindowHandle, WorkspaceId};
use crate::traits::WindowManager;
use std::cell::{Cell, RefCell};

/// In-memory compositor.
///
/// Windows and monitors can be added, closed and refocused between calls;
/// every dispatch is recorded in `attempts`, and every accepted one also in
/// `moves` as `(pid, workspace)`.  Like Hyprland's `pid:` selector, a move
/// only applies to the first window owned by that process.
#[derive(Debug, Default)]
pub struct MockWm {
    pub windows: RefCell<Vec<Window>>,
    pub monitors: RefCell<Vec<Monitor>>,
    pub focused: Cell<Option<WindowHandle>>,
    pub moves: RefCell<Vec<(i32, WorkspaceId)>>,
    pub attempts: RefCell<Vec<(i32, WorkspaceId)>>,
    /// Number of `windows()` calls, to check that empty registries do not
    /// query the compositor.
    pub window_queries: Cell<usize>,
    /// Make every query fail.
    pub offline: Cell<bool>,
    /// Dispatches addressed to these pids fail.
    pub rejected_pids: RefCell<Vec<i32>>,
}

#[derive(Debug, thiserror::Error)]
#[error("mock compositor offline")]
pub struct MockErr;

impl MockWm {
    /// A compositor with two enabled monitors, ids 0 and 1.
    pub fn with_two_monitors() -> Self {
        let wm = Self::default();
        wm.add_monitor(monitor(0, "DP-1", true));
        wm.add_monitor(monitor(1, "HDMI-A-1", true));
        wm
    }

    pub fn add_window(&self, window: Window) {
        self.windows.borrow_mut().push(window);
    }

    pub fn add_monitor(&self, monitor: Monitor) {
        self.monitors.borrow_mut().push(monitor);
    }

    pub fn close_window(&self, handle: WindowHandle) {
        self.windows.borrow_mut().retain(|w| w.handle != handle);
    }

    pub fn focus(&self, handle: Option<WindowHandle>) {
        self.focused.set(handle);
    }

    pub fn get(&self, handle: WindowHandle) -> Option<Window> {
        self.windows
            .borrow()
            .iter()
            .find(|w| w.handle == handle)
            .cloned()
    }
}

impl WindowManager for MockWm {
    type Error = MockErr;

    fn windows(&self) -> Result<Vec<Window>, MockErr> {
        self.window_queries.set(self.window_queries.get() + 1);
        if self.offline.get() {
            return Err(MockErr);
        }
        Ok(self.windows.borrow().clone())
    }

    fn monitors(&self) -> Result<Vec<Monitor>, MockErr> {
        if self.offline.get() {
            return Err(MockErr);
        }
        Ok(self.monitors.borrow().clone())
    }

    fn active_window(&self) -> Result<Option<Window>, MockErr> {
        if self.offline.get() {
            return Err(MockErr);
        }
        Ok(self.focused.get().and_then(|h| self.get(h)))
    }

    fn move_window_to_workspace_silent(&self, pid: i32, ws: WorkspaceId) -> Result<(), MockErr> {
        self.attempts.borrow_mut().push((pid, ws));
        if self.rejected_pids.borrow().contains(&pid) {
            return Err(MockErr);
        }
        self.moves.borrow_mut().push((pid, ws));
        if let Some(w) = self.windows.borrow_mut().iter_mut().find(|w| w.pid == pid) {
            w.workspace = ws;
        }
        Ok(())
    }
}

/// Build a mapped, tiled window whose class equals its title.
pub fn window(
    address: u64,
    title: &str,
    pid: i32,
    monitor: Option<MonitorId>,
    workspace: WorkspaceId,
) -> Window {
    Window {
        handle: WindowHandle(address),
        title: title.into(),
        class: title.into(),
        initial_title: title.into(),
        initial_class: title.into(),
        pid,
        workspace,
        monitor,
        floating: false,
        mapped: true,
        hidden: false,
    }
}

pub fn monitor(id: MonitorId, name: &str, enabled: bool) -> Monitor {
    Monitor {
        id,
        name: name.into(),
        enabled,
    }
}

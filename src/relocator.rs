//! Moving pinned windows along when the virtual desktop changes.
//!
//! A virtual desktop assigns one workspace to every monitor.  When it
//! becomes active, each pinned window is sent to the workspace its own
//! monitor shows on the new desktop, so from the user's point of view the
//! window never leaves its screen.

use crate::command::{Monitor, Window, WindowHandle, WorkspaceId};
use crate::layout::Layout;
use crate::registry::PinRegistry;
use crate::traits::WindowManager;
use log::{info, warn};

/// A silent move issued by [`DesktopRelocator::relocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub window: WindowHandle,
    pub pid: i32,
    pub from: WorkspaceId,
    pub to: WorkspaceId,
}

/// Relocates pinned windows onto the workspaces of a newly active virtual
/// desktop.
#[derive(Debug, Default, Clone)]
pub struct DesktopRelocator {
    verbose: bool,
}

impl DesktopRelocator {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Move every live pinned window to the workspace `layout` assigns to
    /// the monitor it is on.
    ///
    /// Stale pins are dropped first.  A window stays where it is whenever
    /// anything about it is unclear: it vanished, it has no monitor, its
    /// monitor is disabled or missing from `layout`, or it already sits on
    /// the target workspace.  Returns the moves that were dispatched.
    pub fn relocate<W: WindowManager>(
        &self,
        registry: &mut PinRegistry,
        wm: &W,
        target_vdesk: i32,
        layout: &Layout,
    ) -> Vec<PlannedMove> {
        registry.cleanup(wm);

        if registry.is_empty() {
            return Vec::new();
        }

        if self.verbose {
            info!(
                "moving {} pinned window(s) to vdesk {}",
                registry.len(),
                target_vdesk
            );
        }

        let (windows, monitors) = match (wm.windows(), wm.monitors()) {
            (Ok(w), Ok(m)) => (w, m),
            (Err(e), _) | (_, Err(e)) => {
                warn!("cannot relocate pinned windows: {}", e);
                return Vec::new();
            }
        };

        let mut moves = Vec::new();
        for handle in registry.handles() {
            let Some(window) = windows.iter().find(|w| w.handle == handle) else {
                continue;
            };
            let Some(mv) = self.plan(window, &monitors, layout) else {
                continue;
            };

            if self.verbose {
                info!(
                    "moving pinned window '{}' to workspace {}",
                    window.title, mv.to
                );
            }
            match wm.move_window_to_workspace_silent(mv.pid, mv.to) {
                Ok(()) => moves.push(mv),
                Err(e) => warn!("failed to move '{}': {}", window.title, e),
            }
        }
        moves
    }

    /// Decide where `window` has to go, if anywhere.
    fn plan(&self, window: &Window, monitors: &[Monitor], layout: &Layout) -> Option<PlannedMove> {
        let monitor = window
            .monitor
            .and_then(|id| monitors.iter().find(|m| m.id == id))
            .filter(|m| m.enabled)?;

        let Some(target) = layout.workspace_for(monitor.id) else {
            if self.verbose {
                info!(
                    "no workspace found for monitor {} in target layout",
                    monitor.name
                );
            }
            return None;
        };

        if window.workspace == target {
            return None;
        }

        Some(PlannedMove {
            window: window.handle,
            pid: window.pid,
            from: window.workspace,
            to: target,
        })
    }
}

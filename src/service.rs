//! The process-wide pin service.
//!
//! [`PinService`] owns the [`PinRegistry`], the [`DesktopRelocator`] and the
//! [`WindowManager`], and reacts to [`Command`]s.  It is created once at
//! daemon start and handed to the event loop; nothing else touches the
//! registry.

use crate::command::{Command, Reply};
use crate::config::Config;
use crate::registry::PinRegistry;
use crate::relocator::DesktopRelocator;
use crate::selector::resolve_window;
use crate::traits::WindowManager;
use log::debug;

/// Handles pin commands and virtual-desktop switches.
///
/// # Typical usage
///
/// ```ignore
/// let mut service = PinService::new(HyprlandWm::new(), &Config::default());
/// service.handle(Command::Pin(String::new()));
/// ```
pub struct PinService<W: WindowManager> {
    wm: W,
    registry: PinRegistry,
    relocator: DesktopRelocator,
}

impl<W: WindowManager> PinService<W> {
    pub fn new(wm: W, config: &Config) -> Self {
        Self {
            wm,
            registry: PinRegistry::new(config.verbose),
            relocator: DesktopRelocator::new(config.verbose),
        }
    }

    /// Return a shared reference to the pin set.
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Return a shared reference to the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Process a single [`Command`].
    ///
    /// Never fails: a command that cannot be carried out answers
    /// `Success(false)` (or a zero count) and leaves the pin set unchanged.
    pub fn handle(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Pin(arg) => {
                debug!("pin {:?}", arg);
                let window = resolve_window(&self.wm, &arg);
                Reply::Success(self.registry.pin(window.as_ref()))
            }

            Command::Unpin(arg) => {
                debug!("unpin {:?}", arg);
                let window = resolve_window(&self.wm, &arg);
                Reply::Success(self.registry.unpin(window.as_ref()))
            }

            Command::TogglePin(arg) => {
                debug!("toggle pin {:?}", arg);
                let window = resolve_window(&self.wm, &arg);
                Reply::Success(self.registry.toggle_pin(window.as_ref()))
            }

            Command::IsPinned(arg) => {
                let window = resolve_window(&self.wm, &arg);
                Reply::Success(self.registry.is_pinned(window.as_ref()))
            }

            Command::Relocate(target) => {
                debug!("vdesk {} is now active", target.vdesk);
                let moves = self.relocator.relocate(
                    &mut self.registry,
                    &self.wm,
                    target.vdesk,
                    &target.layout,
                );
                Reply::Moved(moves.len())
            }

            Command::Cleanup => Reply::Removed(self.registry.cleanup(&self.wm)),

            Command::List => Reply::Pinned(self.registry.handles()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{RelocateTarget, WindowHandle};
    use crate::layout::Layout;
    use crate::mock::{window, MockWm};

    fn make_service() -> PinService<MockWm> {
        let wm = MockWm::with_two_monitors();
        let mut kitty = window(0x1, "shell", 10, Some(0), 1);
        kitty.class = "kitty".into();
        let mut firefox = window(0x2, "web", 20, Some(1), 2);
        firefox.class = "firefox".into();
        wm.add_window(kitty);
        wm.add_window(firefox);
        wm.focus(Some(WindowHandle(0x1)));
        PinService::new(wm, &Config::default())
    }

    fn relocate(vdesk: i32, layout: Layout) -> Command {
        Command::Relocate(RelocateTarget { vdesk, layout })
    }

    #[test]
    fn pin_focused_window() {
        let mut s = make_service();
        assert_eq!(s.handle(Command::Pin(String::new())), Reply::Success(true));
        assert_eq!(s.handle(Command::IsPinned(String::new())), Reply::Success(true));
        assert_eq!(s.handle(Command::Pin(String::new())), Reply::Success(false));
    }

    #[test]
    fn pin_by_selector() {
        let mut s = make_service();
        assert_eq!(s.handle(Command::Pin("firefox".into())), Reply::Success(true));
        assert!(s.registry().contains(WindowHandle(0x2)));
        assert!(!s.registry().contains(WindowHandle(0x1)));
    }

    #[test]
    fn pin_unknown_window_fails() {
        let mut s = make_service();
        assert_eq!(s.handle(Command::Pin("class:nope".into())), Reply::Success(false));
        assert!(s.registry().is_empty());
    }

    #[test]
    fn pin_without_focus_fails() {
        let mut s = make_service();
        s.wm().focus(None);
        assert_eq!(s.handle(Command::Pin(String::new())), Reply::Success(false));
        assert_eq!(s.handle(Command::IsPinned(String::new())), Reply::Success(false));
    }

    #[test]
    fn toggle_and_unpin() {
        let mut s = make_service();
        assert_eq!(s.handle(Command::TogglePin("kitty".into())), Reply::Success(true));
        assert_eq!(s.handle(Command::IsPinned("kitty".into())), Reply::Success(true));
        assert_eq!(s.handle(Command::TogglePin("kitty".into())), Reply::Success(true));
        assert_eq!(s.handle(Command::IsPinned("kitty".into())), Reply::Success(false));
        assert_eq!(s.handle(Command::Unpin("kitty".into())), Reply::Success(false));
    }

    #[test]
    fn list_reports_sorted_addresses() {
        let mut s = make_service();
        s.handle(Command::Pin("firefox".into()));
        s.handle(Command::Pin("kitty".into()));
        assert_eq!(
            s.handle(Command::List),
            Reply::Pinned(vec![WindowHandle(0x1), WindowHandle(0x2)])
        );
    }

    #[test]
    fn cleanup_reports_removed_count() {
        let mut s = make_service();
        s.handle(Command::Pin("firefox".into()));
        s.handle(Command::Pin("kitty".into()));
        s.wm().close_window(WindowHandle(0x2));
        assert_eq!(s.handle(Command::Cleanup), Reply::Removed(1));
        assert_eq!(s.handle(Command::Cleanup), Reply::Removed(0));
    }

    #[test]
    fn relocate_moves_pinned_windows_only() {
        let mut s = make_service();
        s.handle(Command::Pin("kitty".into()));
        let reply = s.handle(relocate(2, Layout::new([(0, 11), (1, 12)])));
        assert_eq!(reply, Reply::Moved(1));
        assert_eq!(*s.wm().moves.borrow(), vec![(10, 11)]);
    }

    #[test]
    fn relocate_follows_monitor_across_desktops() {
        let mut s = make_service();
        s.handle(Command::Pin("firefox".into()));
        s.handle(relocate(2, Layout::new([(0, 11), (1, 12)])));
        s.handle(relocate(3, Layout::new([(0, 21), (1, 22)])));
        s.handle(relocate(1, Layout::new([(0, 1), (1, 2)])));
        assert_eq!(*s.wm().moves.borrow(), vec![(20, 12), (20, 22), (20, 2)]);
    }

    #[test]
    fn relocate_with_nothing_pinned() {
        let mut s = make_service();
        assert_eq!(s.handle(relocate(2, Layout::new([(0, 11)]))), Reply::Moved(0));
        assert!(s.wm().moves.borrow().is_empty());
    }
}

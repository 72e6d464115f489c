//! Commands and types used throughout hyprpin.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] / [`Reply`] describe the daemon protocol, and
//! [`WindowHandle`] / [`Window`] / [`Monitor`] describe what the window
//! manager reports.
//!
//! Window arguments are forwarded as raw selector strings; the daemon
//! resolves them (see [`selector`](crate::selector)).

use crate::layout::Layout;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Workspace identifier as used by the window manager.
pub type WorkspaceId = i64;

/// Monitor identifier as used by the window manager.
pub type MonitorId = i64;

/// Sentinel for "no workspace".
pub const INVALID_WORKSPACE: WorkspaceId = -1;

/// Identity of a window.
///
/// On Hyprland this is the window's address.  Two handles are equal iff they
/// refer to the same window; the handle holds no reference to the window
/// itself, so a closed window simply stops showing up in
/// [`WindowManager::windows`](crate::traits::WindowManager::windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Parse a window address (`"0x55d0c0a1b2c0"`, the `0x` is optional).
pub fn parse_address(s: &str) -> Option<WindowHandle> {
    let s = s.trim();
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.is_empty() {
        return None;
    }
    u64::from_str_radix(hex, 16).ok().map(WindowHandle)
}

impl Serialize for WindowHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WindowHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).ok_or_else(|| DeError::custom(format!("invalid window address: {:?}", s)))
    }
}

/// A snapshot of one window as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub handle: WindowHandle,
    /// Human-readable title (used in log lines).
    pub title: String,
    pub class: String,
    pub initial_title: String,
    pub initial_class: String,
    /// Owning process id; silent moves are addressed by it.
    pub pid: i32,
    /// Workspace the window currently sits on.
    pub workspace: WorkspaceId,
    /// Monitor the window is on, or `None` if it has none.
    pub monitor: Option<MonitorId>,
    pub floating: bool,
    pub mapped: bool,
    pub hidden: bool,
}

/// A monitor known to the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub id: MonitorId,
    /// Connector name (e.g. `"DP-1"`).
    pub name: String,
    pub enabled: bool,
}

/// Target of a [`Command::Relocate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocateTarget {
    /// Virtual desktop that just became active (used for logging).
    pub vdesk: i32,
    /// Monitor → workspace assignment of that virtual desktop.
    pub layout: Layout,
}

/// Every action the daemon can perform.
///
/// Window arguments are selector strings; an empty string means the focused
/// window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pin the selected window.
    Pin(String),
    /// Unpin the selected window.
    Unpin(String),
    /// Pin the selected window if it is not pinned, unpin it otherwise.
    TogglePin(String),
    /// Ask whether the selected window is pinned.
    IsPinned(String),
    /// Move every pinned window onto the workspace its monitor shows on the
    /// given virtual desktop.  Sent whenever the active virtual desktop
    /// changes.
    Relocate(RelocateTarget),
    /// Drop pins of windows that no longer exist.
    Cleanup,
    /// List the addresses of pinned windows.
    List,
}

/// Answer to a [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    /// Outcome of `Pin`, `Unpin`, `TogglePin` and `IsPinned`.
    Success(bool),
    /// Number of stale pins dropped by `Cleanup`.
    Removed(usize),
    /// Number of windows moved by `Relocate`.
    Moved(usize),
    /// Pinned window addresses, ascending.
    Pinned(Vec<WindowHandle>),
    /// The request could not be understood.
    Error(String),
}

//! **hyprpin** — pinned windows that follow their monitor across virtual
//! desktops.
//!
//! A virtual desktop binds every monitor to one workspace.  Switching
//! desktops swaps all of those workspaces at once, which normally hides every
//! window.  A *pinned* window is moved along instead: after each switch it
//! lands on the workspace its own monitor now shows.
//!
//! # Architecture
//!
//! * [`registry::PinRegistry`] — the identity-keyed set of pinned windows.
//! * [`relocator::DesktopRelocator`] — moves pinned windows when a virtual
//!   desktop becomes active.
//! * [`selector`] — turns command arguments into windows.
//! * [`service::PinService`] — owns the above and answers
//!   [`command::Command`]s.
//!
//! The core talks to the compositor only through
//! [`traits::WindowManager`]; [`hyprland`] implements it over Hyprland IPC
//! and [`ipc`] delivers commands over a Unix socket.

pub mod command;
pub mod config;
pub mod hyprland;
pub mod ipc;
pub mod layout;
pub mod registry;
pub mod relocator;
pub mod selector;
pub mod service;
pub mod traits;

#[cfg(test)]
mod mock;

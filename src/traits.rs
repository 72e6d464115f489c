//! Core traits that decouple hyprpin from any specific window manager or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The [`PinService`](crate::service::PinService)
//! only depends on these abstractions.

use crate::command::{Command, Monitor, Reply, Window, WorkspaceId};
use crate::selector::WindowSelector;
use std::sync::mpsc;

/// Abstraction over the compositor that owns the windows being pinned.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.  Every query reflects the live state at the
/// time of the call; nothing returned here is kept up to date afterwards.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return every window that currently exists.
    ///
    /// This is also the existence check: a handle is live iff it appears
    /// here.  Callers take one snapshot per pass rather than asking per
    /// window.
    fn windows(&self) -> Result<Vec<Window>, Self::Error>;

    /// Return the list of monitors, including disabled ones.
    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error>;

    /// Return the currently focused window, or `None` if no window is
    /// focused.
    fn active_window(&self) -> Result<Option<Window>, Self::Error>;

    /// Move the window owned by `pid` to `workspace_id` without touching
    /// focus and without any transition animation.
    fn move_window_to_workspace_silent(
        &self,
        pid: i32,
        workspace_id: WorkspaceId,
    ) -> Result<(), Self::Error>;

    /// Return the first mapped, visible window matching `selector`.
    fn find_window(&self, selector: &WindowSelector) -> Result<Option<Window>, Self::Error> {
        if let WindowSelector::Active = selector {
            return self.active_window();
        }
        Ok(self
            .windows()?
            .into_iter()
            .filter(|w| w.mapped && !w.hidden)
            .find(|w| selector.matches(w)))
    }
}

/// A [`Command`] together with the channel its [`Reply`] goes back on.
#[derive(Debug)]
pub struct Request {
    pub command: Command,
    pub reply: mpsc::Sender<Reply>,
}

impl Request {
    /// Wrap `command`, returning the request and the receiving end of its
    /// reply channel.
    pub fn new(command: Command) -> (Self, mpsc::Receiver<Reply>) {
        let (reply, rx) = mpsc::channel();
        (Self { command, reply }, rx)
    }
}

/// A source of [`Request`]s.
///
/// Implementations listen on some transport — a Unix socket, an in-memory
/// channel, … — and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming request into `sink`.
    ///
    /// This method blocks the calling thread.
    fn run(&mut self, sink: mpsc::Sender<Request>) -> Result<(), Self::Error>;
}

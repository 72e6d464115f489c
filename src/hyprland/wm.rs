//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.

use crate::command::{parse_address, Monitor, Window, WorkspaceId};
use crate::traits::WindowManager;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// No connection is kept open; every query or dispatch is a short-lived
/// request on the command socket.
#[derive(Debug, Default)]
pub struct HyprlandWm;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl HyprlandWm {
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(runtime_dir)
        .join("hypr")
        .join(his)
        .join(".socket.sock"))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandWmError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandWmError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandWmError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

#[derive(Deserialize)]
struct WorkspaceRefJson {
    id: WorkspaceId,
}

/// Subset of a client object returned by `j/clients` and `j/activewindow`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientJson {
    address: String,
    #[serde(default = "yes")]
    mapped: bool,
    #[serde(default)]
    hidden: bool,
    workspace: WorkspaceRefJson,
    #[serde(default)]
    floating: bool,
    monitor: i64,
    #[serde(default)]
    class: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    initial_class: String,
    #[serde(default)]
    initial_title: String,
    pid: i32,
}

fn yes() -> bool {
    true
}

/// Subset of a monitor object returned by `j/monitors all`.
#[derive(Deserialize)]
struct MonitorJson {
    id: i64,
    name: String,
    /// Only reported by `monitors all`; older Hyprland versions omit it.
    #[serde(default)]
    disabled: bool,
}

fn client_to_window(c: ClientJson) -> Result<Window, HyprlandWmError> {
    let handle = parse_address(&c.address)
        .ok_or_else(|| HyprlandWmError(format!("bad window address: {:?}", c.address)))?;
    Ok(Window {
        handle,
        title: c.title,
        class: c.class,
        initial_title: c.initial_title,
        initial_class: c.initial_class,
        pid: c.pid,
        workspace: c.workspace.id,
        // Hyprland reports -1 for windows without a monitor.
        monitor: (c.monitor >= 0).then_some(c.monitor),
        floating: c.floating,
        mapped: c.mapped,
        hidden: c.hidden,
    })
}

/// Parse the output of `j/clients`.
pub fn parse_clients(json: &str) -> Result<Vec<Window>, HyprlandWmError> {
    let clients: Vec<ClientJson> =
        serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
    clients.into_iter().map(client_to_window).collect()
}

/// Parse the output of `j/activewindow`.
///
/// Hyprland answers with an empty object `{}` when no window is focused.
pub fn parse_active_window(json: &str) -> Result<Option<Window>, HyprlandWmError> {
    if json.trim() == "{}" {
        return Ok(None);
    }
    let client: ClientJson =
        serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
    client_to_window(client).map(Some)
}

/// Parse the output of `j/monitors all`.
pub fn parse_monitors(json: &str) -> Result<Vec<Monitor>, HyprlandWmError> {
    let monitors: Vec<MonitorJson> =
        serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
    Ok(monitors
        .into_iter()
        .map(|m| Monitor {
            id: m.id,
            name: m.name,
            enabled: !m.disabled,
        })
        .collect())
}

/// Argument string for a silent move addressed by process id.
fn silent_move_args(pid: i32, workspace_id: WorkspaceId) -> String {
    format!("movetoworkspacesilent {},pid:{}", workspace_id, pid)
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Error = HyprlandWmError;

    fn windows(&self) -> Result<Vec<Window>, Self::Error> {
        parse_clients(&ipc_json("clients")?)
    }

    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error> {
        parse_monitors(&ipc_json("monitors all")?)
    }

    fn active_window(&self) -> Result<Option<Window>, Self::Error> {
        parse_active_window(&ipc_json("activewindow")?)
    }

    fn move_window_to_workspace_silent(
        &self,
        pid: i32,
        workspace_id: WorkspaceId,
    ) -> Result<(), Self::Error> {
        ipc_dispatch(&silent_move_args(pid, workspace_id))
    }
}

//! IPC listener that accepts commands over a Unix socket.
//!
//! External tools (key-bind helpers, the virtual-desktop switcher, …) can
//! connect to the socket, send newline-delimited JSON commands and read one
//! JSON reply per command.

pub mod listener;

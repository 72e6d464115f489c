//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Command`] and answered
//! with one JSON-encoded [`Reply`] line.
//!
//! # Wire format
//!
//! ```json
//! {"Pin":""}
//! {"TogglePin":"class:firefox"}
//! {"IsPinned":"pid:4242"}
//! {"Relocate":{"vdesk":2,"layout":"0:4 1:5"}}
//! "Cleanup"
//! "List"
//! ```

use crate::command::{Command, Reply};
use crate::traits::{CommandSource, Request};
use log::{debug, error, info};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded commands.
///
/// Each accepted connection can send multiple newline-delimited JSON
/// commands.  When the connection closes, the listener waits for the
/// next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do after serving a connection.
enum Served {
    Continue,
    SinkClosed,
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn serve(stream: UnixStream, sink: &mpsc::Sender<Request>) -> Result<Served, UnixSocketError> {
        let reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;

        for line in reader.lines() {
            let text = line?;
            if text.trim().is_empty() {
                continue;
            }

            let reply = match serde_json::from_str::<Command>(&text) {
                Ok(cmd) => {
                    debug!("received {:?}", cmd);
                    let (req, rx) = Request::new(cmd);
                    if sink.send(req).is_err() {
                        return Ok(Served::SinkClosed);
                    }
                    match rx.recv() {
                        Ok(reply) => reply,
                        Err(_) => return Ok(Served::SinkClosed),
                    }
                }
                Err(e) => {
                    error!("bad command: {}: {}", text, e);
                    Reply::Error(e.to_string())
                }
            };

            let mut out = serde_json::to_string(&reply)?;
            out.push('\n');
            writer.write_all(out.as_bytes())?;
        }
        Ok(Served::Continue)
    }
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** until the receiving end of `sink` is dropped.
    fn run(&mut self, sink: mpsc::Sender<Request>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    match Self::serve(stream, &sink) {
                        Ok(Served::Continue) => debug!("client disconnected"),
                        Ok(Served::SinkClosed) => {
                            info!("sink closed, shutting down");
                            break;
                        }
                        Err(e) => error!("client error: {}", e),
                    }
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }

        let _ = std::fs::remove_file(&self.path);
        Ok(())
    }
}

//  Tests

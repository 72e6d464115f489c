//! Entry point for the **hyprpin** daemon.
//!
//! Spawns the command socket listener on a background thread and processes
//! incoming requests on the main thread, which owns the pin set.

use hyprpin::config::Config;
use hyprpin::hyprland::wm::HyprlandWm;
use hyprpin::ipc::listener::UnixSocketListener;
use hyprpin::service::PinService;
use hyprpin::traits::{CommandSource, Request};
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("hyprpin.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprpin`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("hyprpin")
}

/// Try to load the config from `$XDG_CONFIG_HOME/hyprpin/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut config = load_config();
    if std::env::args().any(|a| a == "--verbose") {
        config.verbose = true;
    }

    let socket = config.socket_path.clone().unwrap_or_else(default_socket_path);
    let service = PinService::new(HyprlandWm::new(), &config);

    let (req_tx, req_rx) = mpsc::channel::<Request>();
    spawn_command_source(socket, req_tx);

    run_event_loop(service, req_rx);
}

fn spawn_command_source(path: PathBuf, tx: mpsc::Sender<Request>) {
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
            std::process::exit(1);
        }
    });
}

fn run_event_loop(mut service: PinService<HyprlandWm>, req_rx: mpsc::Receiver<Request>) {
    info!("hyprpin running");
    for req in req_rx {
        let reply = service.handle(req.command);
        // The client may have gone away; nothing to do then.
        let _ = req.reply.send(reply);
    }
    info!("command source closed, exiting");
}

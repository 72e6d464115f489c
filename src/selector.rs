//! Translating user-supplied window arguments into windows.
//!
//! Arguments use Hyprland's window selector syntax:
//!
//! | argument              | selects                                  |
//! |-----------------------|------------------------------------------|
//! | *(empty)*             | the focused window                       |
//! | `activewindow`        | the focused window                       |
//! | `class:REGEX`         | first window whose class matches         |
//! | `initialclass:REGEX`  | … initial class matches                  |
//! | `title:REGEX`         | … title matches                          |
//! | `initialtitle:REGEX`  | … initial title matches                  |
//! | `pid:N`               | … owned by process `N`                   |
//! | `address:0xHEX`       | the window at that address               |
//! | `floating` / `tiled`  | first floating / tiled window            |
//! | `REGEX`               | same as `class:REGEX`                    |
//!
//! Regexes must match the whole field.

use crate::command::{parse_address, Window, WindowHandle};
use crate::traits::WindowManager;
use log::warn;
use regex::Regex;

/// Error from parsing a selector string.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("invalid regex {0:?}: {1}")]
    Regex(String, #[source] regex::Error),
    #[error("invalid pid: {0:?}")]
    Pid(String),
    #[error("invalid window address: {0:?}")]
    Address(String),
}

/// A parsed window selector.
#[derive(Debug, Clone)]
pub enum WindowSelector {
    Active,
    Class(Regex),
    InitialClass(Regex),
    Title(Regex),
    InitialTitle(Regex),
    Pid(i32),
    Address(WindowHandle),
    Floating,
    Tiled,
}

/// Compile `pattern` so that it has to match the whole input.
fn full_match(pattern: &str) -> Result<Regex, SelectorError> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| SelectorError::Regex(pattern.to_string(), e))
}

impl WindowSelector {
    /// Parse a non-empty selector string.
    pub fn parse(arg: &str) -> Result<Self, SelectorError> {
        let arg = arg.trim();
        match arg {
            "activewindow" => return Ok(Self::Active),
            "floating" => return Ok(Self::Floating),
            "tiled" => return Ok(Self::Tiled),
            _ => {}
        }

        if let Some(p) = arg.strip_prefix("initialclass:") {
            Ok(Self::InitialClass(full_match(p)?))
        } else if let Some(p) = arg.strip_prefix("initialtitle:") {
            Ok(Self::InitialTitle(full_match(p)?))
        } else if let Some(p) = arg.strip_prefix("class:") {
            Ok(Self::Class(full_match(p)?))
        } else if let Some(p) = arg.strip_prefix("title:") {
            Ok(Self::Title(full_match(p)?))
        } else if let Some(p) = arg.strip_prefix("pid:") {
            p.trim()
                .parse()
                .map(Self::Pid)
                .map_err(|_| SelectorError::Pid(p.to_string()))
        } else if let Some(a) = arg.strip_prefix("address:") {
            parse_address(a)
                .map(Self::Address)
                .ok_or_else(|| SelectorError::Address(a.to_string()))
        } else {
            Ok(Self::Class(full_match(arg)?))
        }
    }

    /// Whether `window` is selected.
    ///
    /// [`Active`](Self::Active) depends on focus, not on the window itself,
    /// and never matches here; [`WindowManager::find_window`] handles it.
    pub fn matches(&self, window: &Window) -> bool {
        match self {
            Self::Active => false,
            Self::Class(re) => re.is_match(&window.class),
            Self::InitialClass(re) => re.is_match(&window.initial_class),
            Self::Title(re) => re.is_match(&window.title),
            Self::InitialTitle(re) => re.is_match(&window.initial_title),
            Self::Pid(pid) => window.pid == *pid,
            Self::Address(handle) => window.handle == *handle,
            Self::Floating => window.floating,
            Self::Tiled => !window.floating,
        }
    }
}

/// Resolve a command argument to a window.
///
/// An empty argument selects the focused window.  Anything else is parsed as
/// a [`WindowSelector`].  Every failure (bad selector, window manager error,
/// no match) yields `None`.
pub fn resolve_window<W: WindowManager>(wm: &W, arg: &str) -> Option<Window> {
    let result = if arg.trim().is_empty() {
        wm.active_window()
    } else {
        let selector = match WindowSelector::parse(arg) {
            Ok(s) => s,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };
        wm.find_window(&selector)
    };

    result.unwrap_or_else(|e| {
        warn!("window lookup for {:?} failed: {}", arg, e);
        None
    })
}

//! Virtual-desktop layouts.
//!
//! A [`Layout`] is the concrete monitor → workspace assignment of one virtual
//! desktop at the moment it becomes active.  It is supplied fresh with every
//! relocation request and never stored.

use crate::command::{MonitorId, WorkspaceId, INVALID_WORKSPACE};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One `monitor -> workspace` assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub monitor: MonitorId,
    pub workspace: WorkspaceId,
}

/// Maps monitor ids to workspace ids.
///
/// Entries keep their insertion order.  A layout is expected to hold at most
/// one entry per monitor; if it holds more, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
}

impl Layout {
    /// Create a layout from an iterator of `(monitor_id, workspace_id)`.
    pub fn new(pairs: impl IntoIterator<Item = (MonitorId, WorkspaceId)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(monitor, workspace)| LayoutEntry { monitor, workspace })
                .collect(),
        }
    }

    /// Look up the workspace assigned to `monitor`.
    ///
    /// Returns `None` when the monitor has no entry or its entry holds the
    /// [`INVALID_WORKSPACE`] sentinel.
    pub fn workspace_for(&self, monitor: MonitorId) -> Option<WorkspaceId> {
        self.entries
            .iter()
            .find(|e| e.monitor == monitor)
            .map(|e| e.workspace)
            .filter(|ws| *ws != INVALID_WORKSPACE)
    }

    /// Return an iterator over `(monitor_id, workspace_id)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MonitorId, WorkspaceId)> + '_ {
        self.entries.iter().map(|e| (e.monitor, e.workspace))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the compact form `"0:4 1:5"` (also accepts `,` as separator).
fn parse_compact(s: &str) -> Result<Layout, String> {
    let mut entries = Vec::new();
    for part in s.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        let (mon, ws) = part
            .split_once(':')
            .ok_or_else(|| format!("layout: expected \"monitor:workspace\", got {:?}", part))?;
        let monitor: MonitorId = mon
            .parse()
            .map_err(|_| format!("layout: bad monitor id {:?}", mon))?;
        let workspace: WorkspaceId = ws
            .parse()
            .map_err(|_| format!("layout: bad workspace id {:?}", ws))?;
        entries.push(LayoutEntry { monitor, workspace });
    }
    Ok(Layout { entries })
}

impl Serialize for Layout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.entries)
    }
}

/// Wire format: a list of `{"monitor", "workspace"}` objects or a compact
/// `"monitor:workspace ..."` string.
impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Layout;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "list of {{monitor, workspace}} or string \"monitor:workspace ...\"")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Layout, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = seq.next_element::<LayoutEntry>()? {
                    entries.push(entry);
                }
                Ok(Layout { entries })
            }
            fn visit_str<E>(self, s: &str) -> Result<Layout, E>
            where
                E: DeError,
            {
                parse_compact(s).map_err(DeError::custom)
            }
        }
        deserializer.deserialize_any(V)
    }
}

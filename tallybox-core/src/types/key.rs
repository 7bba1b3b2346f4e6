//! Keys identifying windows, groups and the buckets at their intersection.

use std::fmt::Display;

/// Label of a group as returned by a group function
pub type GroupKey = String;

/// Canonical label of the window an event falls into.
///
/// For fixed windows this is the window index string, e.g. `1h-396199`,
/// for all other window types it is the configured label itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey(String);

impl WindowKey {
    /// Create a window key from its label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label of this window
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WindowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WindowKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WindowKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifies a single bucket: one window, optionally split by group.
///
/// Both parts are kept as separate fields, so no group label, whatever its
/// content, can ever alias another window/group combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    window: WindowKey,
    group: Option<GroupKey>,
}

impl BucketKey {
    /// Key of the bucket for `window` and the optional `group`
    pub fn new(window: WindowKey, group: Option<GroupKey>) -> Self {
        Self { window, group }
    }

    /// Window part of this key
    pub fn window_key(&self) -> &WindowKey {
        &self.window
    }

    /// Group part of this key, `None` if events are not grouped
    pub fn group_key(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{}[{group}]", self.window),
            None => write!(f, "{}", self.window),
        }
    }
}

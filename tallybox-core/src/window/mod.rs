//! Window types and the functions assigning events to windows.
mod fixed;

pub use fixed::FixedWindow;
use thiserror::Error;

use crate::types::{Timestamp, WindowKey};

/// Name of the window type which splits time into fixed, aligned windows
pub const FIXED: &str = "fixed";

/// How events are assigned to windows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// Calendar aligned windows of a fixed duration.
    /// Every event falls into exactly one window determined by its timestamp.
    Fixed(FixedWindow),
    /// A single unbounded window. All events map to the same window key,
    /// which is the given label.
    Global(String),
}

impl WindowType {
    /// Build a window type from its configured name and optional duration.
    ///
    /// `"fixed"` requires a duration like `"1h"`, every other name denotes a
    /// global window and must not carry a duration.
    pub fn from_parts(window_type: &str, duration: Option<&str>) -> Result<Self, ConfigError> {
        match (window_type, duration) {
            (FIXED, Some(duration)) => Ok(Self::Fixed(duration.parse()?)),
            (FIXED, None) => Err(ConfigError::MissingDuration),
            ("", _) => Err(ConfigError::EmptyWindowType),
            (label, Some(_)) => Err(ConfigError::UnexpectedDuration(label.to_owned())),
            (label, None) => Ok(Self::Global(label.to_owned())),
        }
    }

    /// A single unbounded window labeled `label`
    pub fn global(label: impl Into<String>) -> Self {
        Self::Global(label.into())
    }

    /// Whether windows of this type are fixed windows
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Key of the window an event at `timestamp` falls into
    pub fn window_key(&self, timestamp: Timestamp) -> WindowKey {
        match self {
            Self::Fixed(fixed) => fixed.window_key(timestamp),
            Self::Global(label) => WindowKey::new(label.as_str()),
        }
    }
}

impl From<FixedWindow> for WindowType {
    fn from(value: FixedWindow) -> Self {
        Self::Fixed(value)
    }
}

/// Invalid or contradictory windowing configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Fixed windows require a window duration")]
    MissingDuration,
    #[error("Window type '{0}' is not fixed and must not have a window duration")]
    UnexpectedDuration(String),
    #[error("Window type must not be empty")]
    EmptyWindowType,
    #[error("Invalid window duration '{0}', expected something like '30s', '5m' or '1h'")]
    InvalidDuration(String),
    #[error("Window duration must be greater than zero")]
    ZeroDuration,
}

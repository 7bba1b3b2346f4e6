use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::window::{ConfigError, WindowType};

/// When a collector hands buckets to its trigger callback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmitPolicy {
    /// After every event, emit every live bucket. Nothing is ever removed.
    EachEvent,
    /// When a fixed window's first event arrives, emit and remove all buckets
    /// of other windows.
    Discard,
    /// Never emit on events, only on an explicit flush
    #[default]
    Manual,
}

/// Windowing and emission settings of a pipeline.
///
/// These are plain data and may be deserialized from a configuration file.
/// Validation happens when a collector is built from them, see
/// [Collector::from_settings](super::Collector::from_settings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CollectorSettings {
    /// `"fixed"` or the label of a global window
    #[builder(into)]
    pub window_type: String,
    /// Duration of fixed windows, e.g. `"5m"`
    #[builder(into)]
    #[serde(default)]
    pub window_duration: Option<String>,
    /// When buckets are emitted
    #[builder(default)]
    #[serde(default)]
    pub emit_on: EmitPolicy,
}

impl CollectorSettings {
    /// Validate the windowing part of these settings
    pub fn window(&self) -> Result<WindowType, ConfigError> {
        WindowType::from_parts(&self.window_type, self.window_duration.as_deref())
    }
}

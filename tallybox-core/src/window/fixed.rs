use std::{fmt::Display, ops::Range, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::types::{Timestamp, WindowKey};

const UNITS: [(&str, i64); 5] = [
    ("d", 86_400_000),
    ("h", 3_600_000),
    ("m", 60_000),
    ("s", 1_000),
    ("ms", 1),
];

/// Fixed windows of a constant length, aligned to the Unix epoch.
///
/// Window `n` spans `[n * length, (n + 1) * length)` milliseconds and is
/// labeled `<duration>-<n>`, e.g. `1h-0` for the first hour of 1970-01-01.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixedWindow {
    label: String,
    length_ms: i64,
}

impl FixedWindow {
    /// Fixed windows of the given length. The length must be a positive
    /// whole number of milliseconds.
    pub fn from_duration(duration: Duration) -> Result<Self, ConfigError> {
        if duration.subsec_nanos() % 1_000_000 != 0 {
            return Err(ConfigError::InvalidDuration(format!("{duration:?}")));
        }
        let length_ms = i64::try_from(duration.as_millis())
            .map_err(|_| ConfigError::InvalidDuration(format!("{duration:?}")))?;
        if length_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        // largest unit which divides the length evenly, "ms" always does
        let (unit, factor) = UNITS
            .iter()
            .find(|(_, factor)| length_ms % factor == 0)
            .copied()
            .unwrap_or(("ms", 1));
        Ok(Self {
            label: format!("{}{unit}", length_ms / factor),
            length_ms,
        })
    }

    /// Duration label of these windows, e.g. `5m`
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Length of a single window
    pub fn length(&self) -> Duration {
        Duration::from_millis(self.length_ms.unsigned_abs())
    }

    /// Index of the window containing `timestamp`.
    /// Timestamps before the epoch fall into negative windows.
    pub fn position(&self, timestamp: Timestamp) -> i64 {
        timestamp.div_euclid(self.length_ms)
    }

    /// Key of the window containing `timestamp`
    pub fn window_key(&self, timestamp: Timestamp) -> WindowKey {
        WindowKey::new(format!("{}-{}", self.label, self.position(timestamp)))
    }

    /// Time range `[begin, end)` covered by the window with the given key.
    /// Returns `None` if the key was not produced by windows of this duration.
    pub fn bounds(&self, key: &WindowKey) -> Option<Range<Timestamp>> {
        let position: i64 = key
            .as_str()
            .strip_prefix(self.label.as_str())?
            .strip_prefix('-')?
            .parse()
            .ok()?;
        let begin = position.checked_mul(self.length_ms)?;
        let end = begin.checked_add(self.length_ms)?;
        Some(begin..end)
    }
}

impl FromStr for FixedWindow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidDuration(s.to_owned());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (amount, unit) = trimmed.split_at(split);
        let amount: i64 = amount.parse().map_err(|_| invalid())?;
        let factor = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(invalid)?;
        if amount == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        let length_ms = amount.checked_mul(factor).ok_or_else(invalid)?;
        Ok(Self {
            label: format!("{amount}{unit}"),
            length_ms,
        })
    }
}

impl TryFrom<String> for FixedWindow {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FixedWindow> for String {
    fn from(value: FixedWindow) -> Self {
        value.label
    }
}

impl Display for FixedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

//! Events and the time they happened at.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Event time in milliseconds since the Unix epoch
pub type Timestamp = i64;

/// A unit of input data which happened at a specific point in time.
///
/// The collector only ever asks an event for its timestamp, everything else
/// about it is opaque and only seen by the group function and the accumulator.
pub trait Event {
    /// Point in time this event happened at
    fn timestamp(&self) -> Timestamp;
}

impl<E: Event + ?Sized> Event for &E {
    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}

/// A value with a timestamp attached to it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimedEvent<V> {
    /// Event time in milliseconds since the Unix epoch
    pub timestamp: Timestamp,
    /// Payload of this event
    pub value: V,
}

impl<V> TimedEvent<V> {
    /// Create a new event happening at `timestamp`
    pub fn new(timestamp: Timestamp, value: V) -> Self {
        Self { timestamp, value }
    }
}

impl<V> Event for TimedEvent<V> {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl<V: Display> Display for TimedEvent<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ timestamp: {}, value: {} }}", self.timestamp, self.value)
    }
}

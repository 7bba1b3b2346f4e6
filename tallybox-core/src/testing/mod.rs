//! Shared fixtures for unit tests

use crate::{
    accumulator::Collection,
    collector::{Collector, EmitPolicy},
    sinks::VecSink,
    types::{Event, Timestamp, WindowKey},
    window::{FixedWindow, WindowType},
};

pub const SENSORS: [&str; 3] = ["a", "b", "c"];

const MINUTE: Timestamp = 60_000;

/// A sensor reading taken at some point on 1970-01-01
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub id: usize,
    pub at: Timestamp,
    pub sensor: &'static str,
}

impl Event for Reading {
    fn timestamp(&self) -> Timestamp {
        self.at
    }
}

/// Timestamp of `hour:minute` on 1970-01-01
pub fn at(hour: i64, minute: i64) -> Timestamp {
    (hour * 60 + minute) * MINUTE
}

pub fn reading(hour: i64, minute: i64, sensor: &'static str) -> Reading {
    Reading {
        id: 0,
        at: at(hour, minute),
        sensor,
    }
}

pub fn by_sensor(reading: &Reading) -> Option<String> {
    Some(reading.sensor.to_owned())
}

/// Collector with one hour fixed windows
pub fn hourly(emit_on: EmitPolicy) -> Collector<Reading> {
    let window = FixedWindow::from_duration(std::time::Duration::from_secs(3600)).unwrap();
    Collector::new(WindowType::Fixed(window), emit_on)
}

/// Sink capturing everything a collector of readings emits
pub fn capture() -> VecSink<(Collection<Reading>, WindowKey)> {
    VecSink::new()
}
